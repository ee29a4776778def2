//! # API レスポンスエンベロープ
//!
//! 公開 API の統一レスポンス形式 `{ "message": string, "data"?: T }` を提供する。
//!
//! - データを返すエンドポイントは [`ApiResponse`]
//! - メッセージのみを返すエンドポイントとすべてのエラーは [`MessageResponse`]

use serde::{Deserialize, Serialize};

/// データ付きレスポンス
///
/// ## 使用例
///
/// ```
/// use toiboard_shared::ApiResponse;
///
/// let response = ApiResponse::new("Successfully retrieved the question", 42);
/// assert_eq!(response.data, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiResponse<T> {
    pub message: String,
    pub data:    T,
}

impl<T> ApiResponse<T> {
    /// 新しい `ApiResponse` を作成する
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// メッセージのみのレスポンス
///
/// 作成・更新・削除の成功応答と、400 / 404 / 500 のエラー応答で共通に使う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
