//! # ヘルスチェックハンドラ
//!
//! - `/health`: Liveness Check（常に `"healthy"` を返す）
//! - `/test`: 疎通確認用の固定文字列

use axum::Json;
use toiboard_shared::HealthResponse;

/// ヘルスチェックエンドポイント
#[utoipa::path(
   get,
   path = "/health",
   tag = "health",
   responses(
      (status = 200, description = "サーバー稼働中", body = HealthResponse)
   )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// 疎通確認エンドポイント
///
/// データベースには触れない。
#[utoipa::path(
   get,
   path = "/test",
   tag = "health",
   responses(
      (status = 200, description = "固定文字列", body = String)
   )
)]
pub async fn api_check() -> Json<&'static str> {
    Json("Server API is working 🚀")
}
