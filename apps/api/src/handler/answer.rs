//! # 回答ハンドラ
//!
//! - `POST /answers/{id}/upvote`
//! - `POST /answers/{id}/downvote`
//!
//! 回答の作成と一覧は質問配下のルートにあるため [`super::question`] を参照。

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use toiboard_domain::{
    answer::Answer,
    vote::{Vote, VotedAnswer},
};
use toiboard_shared::{ApiResponse, MessageResponse};
use utoipa::ToSchema;

use crate::{
    error::{ApiError, Endpoint},
    usecase::AnswerUseCaseImpl,
    validation::{AnswerIdPath, resolve_id},
};

/// 回答 API の共有状態
pub struct AnswerState {
    pub usecase: AnswerUseCaseImpl,
}

/// 回答 DTO
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct AnswerDto {
    pub id:          i64,
    pub question_id: i64,
    pub content:     String,
}

impl From<&Answer> for AnswerDto {
    fn from(answer: &Answer) -> Self {
        Self {
            id:          answer.id().as_i64(),
            question_id: answer.question_id().as_i64(),
            content:     answer.content().to_string(),
        }
    }
}

/// 投票後の回答と集計値
///
/// `downvotes` は反対票の件数（正の値）。
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct AnswerVoteSummary {
    #[serde(flatten)]
    pub answer:    AnswerDto,
    pub upvotes:   i64,
    pub downvotes: i64,
}

impl From<&VotedAnswer> for AnswerVoteSummary {
    fn from(voted: &VotedAnswer) -> Self {
        Self {
            answer:    AnswerDto::from(&voted.answer),
            upvotes:   voted.tally.upvotes(),
            downvotes: voted.tally.downvotes(),
        }
    }
}

/// POST /answers/{id}/upvote
#[utoipa::path(
   post,
   path = "/answers/{id}/upvote",
   tag = "votes",
   params(("id" = i64, Path, description = "回答 ID")),
   responses(
      (status = 200, description = "投票後の集計値", body = ApiResponse<AnswerVoteSummary>),
      (status = 404, description = "回答が存在しない", body = MessageResponse),
      (status = 500, description = "データベースエラー", body = MessageResponse)
   )
)]
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn upvote_answer(
    State(state): State<Arc<AnswerState>>,
    path: AnswerIdPath,
) -> Result<impl IntoResponse, ApiError> {
    vote_answer(&state, path, Vote::Up, "Successfully upvoted the answer.").await
}

/// POST /answers/{id}/downvote
#[utoipa::path(
   post,
   path = "/answers/{id}/downvote",
   tag = "votes",
   params(("id" = i64, Path, description = "回答 ID")),
   responses(
      (status = 200, description = "投票後の集計値", body = ApiResponse<AnswerVoteSummary>),
      (status = 404, description = "回答が存在しない", body = MessageResponse),
      (status = 500, description = "データベースエラー", body = MessageResponse)
   )
)]
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn downvote_answer(
    State(state): State<Arc<AnswerState>>,
    path: AnswerIdPath,
) -> Result<impl IntoResponse, ApiError> {
    vote_answer(&state, path, Vote::Down, "Successfully downvoted the answer.").await
}

async fn vote_answer(
    state: &AnswerState,
    path: AnswerIdPath,
    vote: Vote,
    message: &'static str,
) -> Result<(StatusCode, Json<ApiResponse<AnswerVoteSummary>>), ApiError> {
    let endpoint = Endpoint::VoteAnswer;
    let id = resolve_id(path, endpoint)?;

    let voted = state
        .usecase
        .vote_answer(id, vote)
        .await
        .map_err(|e| e.into_api_error(endpoint))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(message, AnswerVoteSummary::from(&voted))),
    ))
}
