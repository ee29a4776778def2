//! # API エラー定義
//!
//! ユースケースのエラー（[`ForumError`]）と、HTTP レスポンスに変換される
//! [`ApiError`] を定義する。
//!
//! ## エラーの分類
//!
//! | 分類 | HTTP ステータス | 例 |
//! |------|----------------|----|
//! | 入力エラー | 400 | 必須フィールドの欠落 |
//! | 存在しない | 404 | 指定した ID の質問がない |
//! | データベースエラー | 500 | 接続失敗、SQL の実行失敗 |
//!
//! レスポンスボディは常に `{ "message": string }`。メッセージはエンドポイントごとに固定で、
//! データベースエラーの実際の原因はログにだけ出力する。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use toiboard_domain::{answer::AnswerId, question::QuestionId};
use toiboard_infra::InfraError;
use toiboard_shared::MessageResponse;

/// ユースケースで発生するエラー
#[derive(Debug, Error)]
pub enum ForumError {
    #[error("質問が見つかりません: {0}")]
    QuestionNotFound(QuestionId),

    #[error("回答が見つかりません: {0}")]
    AnswerNotFound(AnswerId),

    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

impl ForumError {
    /// エンドポイント固有のメッセージで [`ApiError`] に変換する
    pub fn into_api_error(self, endpoint: Endpoint) -> ApiError {
        match self {
            ForumError::QuestionNotFound(_) | ForumError::AnswerNotFound(_) => endpoint.missing(),
            ForumError::Database(source) => ApiError::Database {
                message: endpoint.database_message(),
                source,
            },
        }
    }
}

/// HTTP レスポンスに変換されるエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// 400 Bad Request
    #[error("不正なリクエスト: {0}")]
    BadRequest(&'static str),

    /// 404 Not Found
    #[error("リソースが見つかりません: {0}")]
    NotFound(&'static str),

    /// 500 Internal Server Error
    #[error("データベースエラー: {source}")]
    Database {
        message: &'static str,
        #[source]
        source:  InfraError,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(message) | ApiError::NotFound(message) => message,
            ApiError::Database { message, source } => {
                tracing::error!(
                    error = %source,
                    connection = source.is_connection(),
                    span_trace = %source.span_trace(),
                    "データベースエラー"
                );
                message
            }
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

/// エラーメッセージを決めるためのエンドポイント種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ListQuestions,
    SearchQuestions,
    GetQuestion,
    CreateQuestion,
    UpdateQuestion,
    DeleteQuestion,
    CreateAnswer,
    ListAnswers,
    VoteQuestion,
    VoteAnswer,
}

pub(crate) const QUESTION_NOT_FOUND: &str = "Question not found";
pub(crate) const ANSWER_NOT_FOUND: &str = "Answer not found";
pub(crate) const SEARCH_NOT_FOUND: &str = "Search Not found. Please check your parameter.";
pub(crate) const ANSWERS_NOT_FOUND: &str = "Answers not found.";

impl Endpoint {
    /// 対象が存在しない場合のエラー
    ///
    /// 回答の作成だけは、親の質問がない場合に 400 を返す。
    pub fn missing(self) -> ApiError {
        match self {
            Endpoint::CreateAnswer => ApiError::BadRequest("Missing or invalid request data."),
            Endpoint::SearchQuestions => ApiError::NotFound(SEARCH_NOT_FOUND),
            Endpoint::ListAnswers => ApiError::NotFound(ANSWERS_NOT_FOUND),
            Endpoint::VoteAnswer => ApiError::NotFound(ANSWER_NOT_FOUND),
            Endpoint::ListQuestions
            | Endpoint::GetQuestion
            | Endpoint::CreateQuestion
            | Endpoint::UpdateQuestion
            | Endpoint::DeleteQuestion
            | Endpoint::VoteQuestion => ApiError::NotFound(QUESTION_NOT_FOUND),
        }
    }

    /// データベースエラー時のメッセージ
    pub fn database_message(self) -> &'static str {
        match self {
            Endpoint::ListQuestions => "Cannot retrieved questions due to database connection.",
            Endpoint::SearchQuestions => "Cannot get questions due to database connection.",
            Endpoint::GetQuestion => "server could not read question because database connection",
            Endpoint::CreateQuestion => "Cannot create a new question due to database connection.",
            Endpoint::UpdateQuestion => {
                "Server could not update a question because database connection"
            }
            Endpoint::DeleteQuestion => {
                "Server could not delete a question because database connection"
            }
            Endpoint::CreateAnswer => "Server could not post an answer because database connection",
            Endpoint::ListAnswers => "There is a problem with database connection.",
            Endpoint::VoteQuestion | Endpoint::VoteAnswer => {
                "There's a problem with database connection"
            }
        }
    }
}
