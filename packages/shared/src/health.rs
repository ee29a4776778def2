//! # ヘルスチェック応答
//!
//! `GET /health` のボディ。データベースには触れず、プロセスが応答できることだけを示す。
//!
//! ```
//! use toiboard_shared::{HealthResponse, health::HealthStatus};
//!
//! let response = HealthResponse::healthy("0.1.0");
//! assert_eq!(response.status, HealthStatus::Healthy);
//! ```

use serde::{Deserialize, Serialize};

/// プロセスの稼働状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum HealthStatus {
    Healthy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    pub status:  HealthStatus,
    /// `CARGO_PKG_VERSION`
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            status:  HealthStatus::Healthy,
            version: version.into(),
        }
    }
}
