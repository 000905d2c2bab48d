//! 核心翻译模块
//!
//! `engine` 封装与外部引擎进程的请求/响应契约，
//! `service` 把各子系统装配为统一的翻译服务。

pub mod engine;
pub mod service;

pub use engine::{
    EngineClient, EngineConfig, EngineRequest, EngineResponse, EngineStats, ProcessEngine,
    SegmentTranslation,
};
pub use service::{
    HealthLevel, HealthStatus, ServiceStats, ServiceStatsSnapshot, TranslationService,
};
