//! # リクエスト検証エクストラクタ
//!
//! ハンドラ本体より前に実行される入力チェック。
//!
//! - [`ValidatedJson`]: JSON ボディをデシリアライズし、必須フィールドの存在を確認する。
//!   失敗した場合はデータベースに触れずに 400 と固定メッセージを返す
//! - [`IdPath`]: パスの `{id}` を整数 ID として取り出す
//!
//! 必須チェックは「値があり、空文字列でない」ことのみを見る。
//! 前後の空白の除去、長さや形式の検証は行わない。

use std::fmt::Display;

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use toiboard_domain::{answer::AnswerId, question::QuestionId};
use toiboard_shared::MessageResponse;

use crate::error::{ApiError, Endpoint};

/// 検証付きリクエストボディ
pub trait ValidateRequest: DeserializeOwned + Send {
    /// 検証済みの値
    type Output: Send;

    /// JSON として読めなかった場合のメッセージ
    const REJECTION_MESSAGE: &'static str;

    /// 検証し、失敗した場合は固定メッセージを返す
    fn validate(self) -> Result<Self::Output, &'static str>;
}

/// 必須の文字列フィールドを取り出す（未指定・空文字列は `None`）
pub fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// 検証済みの JSON ボディ
#[derive(Debug)]
pub struct ValidatedJson<R: ValidateRequest>(pub R::Output);

impl<S, R> FromRequest<S> for ValidatedJson<R>
where
    S: Send + Sync,
    R: ValidateRequest,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<R>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "リクエストボディを読み取れませんでした");
                ApiError::BadRequest(R::REJECTION_MESSAGE)
            })?;

        raw.validate().map(Self).map_err(|message| {
            tracing::debug!(message, "リクエストボディの検証に失敗しました");
            ApiError::BadRequest(message)
        })
    }
}

/// パスパラメータの ID
///
/// 整数として解釈できない `{id}` は [`InvalidId`] で拒否する。
/// そのような ID のリソースは存在し得ないため、ハンドラは「見つからない」として扱う。
#[derive(Debug, Clone, Copy)]
pub struct IdPath<Id>(pub Id);

/// 整数として解釈できないパスパラメータ
#[derive(Debug)]
pub struct InvalidId;

impl IntoResponse for InvalidId {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, Json(MessageResponse::new("Not found"))).into_response()
    }
}

impl<S, Id> FromRequestParts<S> for IdPath<Id>
where
    S: Send + Sync,
    Id: From<i64>,
{
    type Rejection = InvalidId;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "パスの ID を整数として解釈できませんでした");
                InvalidId
            })?;
        Ok(Self(Id::from(raw)))
    }
}

/// パスの ID を取り出し、現在のスパンの `id` フィールドに記録する
///
/// 整数でない ID はエンドポイントの「見つからない」エラーになる。
pub fn resolve_id<Id: Display>(
    path: Result<IdPath<Id>, InvalidId>,
    endpoint: Endpoint,
) -> Result<Id, ApiError> {
    let IdPath(id) = path.map_err(|_| endpoint.missing())?;
    tracing::Span::current().record("id", tracing::field::display(&id));
    Ok(id)
}

/// 質問 ID のパスパラメータ（拒否された場合は `Err`）
pub type QuestionIdPath = Result<IdPath<QuestionId>, InvalidId>;

/// 回答 ID のパスパラメータ（拒否された場合は `Err`）
pub type AnswerIdPath = Result<IdPath<AnswerId>, InvalidId>;
