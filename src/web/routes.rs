//! Web 路由定义

#[cfg(feature = "web")]
use axum::{
    routing::{get, post},
    Router,
};

#[cfg(feature = "web")]
use crate::web::{handlers, types::AppState};

/// 创建API路由
#[cfg(feature = "web")]
pub fn create_routes() -> Router<AppState> {
    Router::new()
        // 智能翻译入口
        .route("/api/translate", post(handlers::translate_text))
        // 长文本批量翻译入口
        .route("/api/translate/batch", post(handlers::translate_batch))
        // 健康检查
        .route("/api/health", get(handlers::health))
}
