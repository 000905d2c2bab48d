//! 翻译相关API处理器

#[cfg(feature = "web")]
use axum::{
    extract::{Json as ExtractJson, State},
    http::StatusCode,
    response::Json,
};

use crate::translation::TranslationError;
use crate::web::types::{
    health_level_name, AppState, ErrorResponse, HealthResponse, TranslateRequest,
    TranslateResponse,
};

#[cfg(feature = "web")]
type HandlerError = (StatusCode, Json<ErrorResponse>);

/// 翻译处理器（智能路径：按长度自动选择单次或批量）
#[cfg(feature = "web")]
pub async fn translate_text(
    State(state): State<AppState>,
    ExtractJson(request): ExtractJson<TranslateRequest>,
) -> Result<Json<TranslateResponse>, HandlerError> {
    // 空文本在任何引擎调用之前拒绝
    if request.text.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("文本不能为空")),
        ));
    }

    tracing::info!(
        "翻译请求: {} 字符 ({} -> {})",
        request.text.chars().count(),
        request.from,
        request.to
    );

    match state
        .service
        .translate_text(&request.text, &request.from, &request.to)
        .await
    {
        Ok(outcome) => Ok(Json(TranslateResponse::from(outcome))),
        Err(e) => Err(error_to_response(e)),
    }
}

/// 长文本翻译处理器（强制分段批量路径）
#[cfg(feature = "web")]
pub async fn translate_batch(
    State(state): State<AppState>,
    ExtractJson(request): ExtractJson<TranslateRequest>,
) -> Result<Json<TranslateResponse>, HandlerError> {
    if request.text.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("文本不能为空")),
        ));
    }

    match state
        .service
        .translate_long_text(&request.text, &request.from, &request.to)
        .await
    {
        Ok(outcome) => Ok(Json(TranslateResponse::from(outcome))),
        Err(e) => Err(error_to_response(e)),
    }
}

/// 健康检查处理器
#[cfg(feature = "web")]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let report = state.service.get_health();

    Json(HealthResponse {
        status: health_level_name(report.overall).to_string(),
        components: report
            .components
            .into_iter()
            .map(|(name, level)| (name, health_level_name(level).to_string()))
            .collect(),
    })
}

// 错误消息原样透传给调用方
#[cfg(feature = "web")]
fn error_to_response(error: TranslationError) -> HandlerError {
    let status = match error {
        TranslationError::EmptyInput => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(ErrorResponse::new(error.to_string())))
}
