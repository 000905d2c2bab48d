//! Web 服务器模块
//!
//! 以HTTP API的形式暴露翻译编排能力

pub mod handlers;
pub mod routes;
pub mod types;

pub use routes::*;
pub use types::*;

use std::sync::Arc;

#[cfg(feature = "web")]
use tower_http::cors::CorsLayer;

use crate::translation::{TranslationError, TranslationResult, TranslationService};

/// Web 服务器配置
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub bind_addr: String,
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 7080,
        }
    }
}

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
    service: Arc<TranslationService>,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig, service: Arc<TranslationService>) -> Self {
        Self { config, service }
    }

    /// 启动 Web 服务器
    #[cfg(feature = "web")]
    pub async fn start(&self) -> TranslationResult<()> {
        let state = AppState {
            service: Arc::clone(&self.service),
        };

        let app = create_routes()
            .layer(CorsLayer::permissive())
            .with_state(state);

        let addr = format!("{}:{}", self.config.bind_addr, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TranslationError::Internal(format!("绑定地址 {} 失败: {}", addr, e)))?;

        tracing::info!("翻译服务已启动: http://{}", addr);

        axum::serve(listener, app)
            .await
            .map_err(|e| TranslationError::Internal(format!("服务器异常退出: {}", e)))?;

        Ok(())
    }
}
