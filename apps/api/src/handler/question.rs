//! # 質問ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /questions` - 質問一覧
//! - `GET /questions/search` - タイトル・カテゴリで検索
//! - `POST /questions` - 質問作成
//! - `GET /questions/{id}` - 質問取得
//! - `PUT /questions/{id}` - 質問更新（全置換）
//! - `DELETE /questions/{id}` - 質問と回答の削除
//! - `POST /questions/{id}/answers` - 回答作成
//! - `GET /questions/{id}/answers` - 回答一覧
//! - `POST /questions/{id}/upvote` / `downvote` - 質問への投票

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use toiboard_domain::{
    answer::AnswerContent,
    question::{Question, QuestionContent, QuestionSearch},
    vote::{Vote, VotedQuestion},
};
use toiboard_shared::{ApiResponse, MessageResponse};
use utoipa::{IntoParams, ToSchema};

use super::answer::AnswerDto;
use crate::{
    error::{ApiError, Endpoint},
    usecase::QuestionUseCaseImpl,
    validation::{QuestionIdPath, ValidateRequest, ValidatedJson, required, resolve_id},
};

/// 質問 API の共有状態
pub struct QuestionState {
    pub usecase: QuestionUseCaseImpl,
}

const INVALID_REQUEST_DATA: &str = "Missing or invalid request data";

// --- リクエスト/レスポンス型 ---

/// 質問作成リクエスト
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateQuestionRequest {
    pub title:       Option<String>,
    pub description: Option<String>,
    pub category:    Option<String>,
}

impl ValidateRequest for CreateQuestionRequest {
    type Output = QuestionContent;

    const REJECTION_MESSAGE: &'static str = INVALID_REQUEST_DATA;

    fn validate(self) -> Result<QuestionContent, &'static str> {
        let (Some(title), Some(description), Some(category)) = (
            required(self.title),
            required(self.description),
            required(self.category),
        ) else {
            return Err(INVALID_REQUEST_DATA);
        };
        QuestionContent::new(title, description, category).map_err(|_| INVALID_REQUEST_DATA)
    }
}

/// 質問更新リクエスト
///
/// 3 フィールドとも必須。欠けている最初のフィールドをメッセージで示す。
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuestionRequest {
    pub title:       Option<String>,
    pub description: Option<String>,
    pub category:    Option<String>,
}

const MISSING_TITLE: &str =
    "Bad Request: Could not find your title, please complete filling your infomation.";
const MISSING_DESCRIPTION: &str =
    "Bad Request: Could not find your description, please complete filling your infomation.";
const MISSING_CATEGORY: &str =
    "Bad Request: Could not find your category, please complete filling your infomation.";

impl ValidateRequest for UpdateQuestionRequest {
    type Output = QuestionContent;

    const REJECTION_MESSAGE: &'static str = MISSING_TITLE;

    fn validate(self) -> Result<QuestionContent, &'static str> {
        let title = required(self.title).ok_or(MISSING_TITLE)?;
        let description = required(self.description).ok_or(MISSING_DESCRIPTION)?;
        let category = required(self.category).ok_or(MISSING_CATEGORY)?;
        QuestionContent::new(title, description, category).map_err(|_| MISSING_TITLE)
    }
}

/// 回答作成リクエスト
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAnswerRequest {
    pub content: Option<String>,
}

impl ValidateRequest for CreateAnswerRequest {
    type Output = AnswerContent;

    const REJECTION_MESSAGE: &'static str = INVALID_REQUEST_DATA;

    fn validate(self) -> Result<AnswerContent, &'static str> {
        let content = required(self.content).ok_or(INVALID_REQUEST_DATA)?;
        AnswerContent::new(content).map_err(|_| INVALID_REQUEST_DATA)
    }
}

/// 検索クエリ
///
/// どちらか一方に部分一致（大文字小文字を区別）すれば対象になる。
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// タイトルの部分文字列
    pub title:    Option<String>,
    /// カテゴリの部分文字列
    pub category: Option<String>,
}

/// 質問 DTO
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct QuestionDto {
    pub id:          i64,
    pub title:       String,
    pub description: String,
    pub category:    String,
    /// RFC 3339
    pub created_at:  String,
    /// RFC 3339
    pub updated_at:  String,
}

impl From<&Question> for QuestionDto {
    fn from(question: &Question) -> Self {
        Self {
            id:          question.id().as_i64(),
            title:       question.title().to_string(),
            description: question.description().to_string(),
            category:    question.category().to_string(),
            created_at:  question.created_at().to_rfc3339(),
            updated_at:  question.updated_at().to_rfc3339(),
        }
    }
}

/// 投票後の質問と集計値
///
/// `downvotes` は反対票の符号付き合計（反対票 M 件なら −M）。
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct QuestionVoteSummary {
    #[serde(flatten)]
    pub question:  QuestionDto,
    pub upvotes:   i64,
    pub downvotes: i64,
}

impl From<&VotedQuestion> for QuestionVoteSummary {
    fn from(voted: &VotedQuestion) -> Self {
        Self {
            question:  QuestionDto::from(&voted.question),
            upvotes:   voted.tally.upvotes(),
            downvotes: voted.tally.downvotes(),
        }
    }
}

// --- ハンドラ ---

/// GET /questions
#[utoipa::path(
   get,
   path = "/questions",
   tag = "questions",
   responses(
      (status = 200, description = "質問一覧", body = ApiResponse<Vec<QuestionDto>>),
      (status = 500, description = "データベースエラー", body = MessageResponse)
   )
)]
#[tracing::instrument(skip_all)]
pub async fn list_questions(
    State(state): State<Arc<QuestionState>>,
) -> Result<impl IntoResponse, ApiError> {
    let questions = state
        .usecase
        .list_questions()
        .await
        .map_err(|e| e.into_api_error(Endpoint::ListQuestions))?;

    let data: Vec<QuestionDto> = questions.iter().map(QuestionDto::from).collect();
    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(
            "Successfully retrieved the list of questions",
            data,
        )),
    ))
}

/// GET /questions/search
///
/// 1 件も一致しなければ 404。
#[utoipa::path(
   get,
   path = "/questions/search",
   tag = "questions",
   params(SearchQuery),
   responses(
      (status = 200, description = "検索結果", body = ApiResponse<Vec<QuestionDto>>),
      (status = 404, description = "一致なし", body = MessageResponse),
      (status = 500, description = "データベースエラー", body = MessageResponse)
   )
)]
#[tracing::instrument(skip_all, fields(title = ?query.title, category = ?query.category))]
pub async fn search_questions(
    State(state): State<Arc<QuestionState>>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let criteria = QuestionSearch::new(query.title, query.category);

    let questions = state
        .usecase
        .search_questions(&criteria)
        .await
        .map_err(|e| e.into_api_error(Endpoint::SearchQuestions))?;
    if questions.is_empty() {
        return Err(Endpoint::SearchQuestions.missing());
    }

    let data: Vec<QuestionDto> = questions.iter().map(QuestionDto::from).collect();
    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(
            "Successfully retrieved the search results.",
            data,
        )),
    ))
}

/// POST /questions
#[utoipa::path(
   post,
   path = "/questions",
   tag = "questions",
   request_body = CreateQuestionRequest,
   responses(
      (status = 201, description = "作成成功", body = MessageResponse),
      (status = 400, description = "必須フィールドの欠落", body = MessageResponse),
      (status = 500, description = "データベースエラー", body = MessageResponse)
   )
)]
#[tracing::instrument(skip_all)]
pub async fn create_question(
    State(state): State<Arc<QuestionState>>,
    ValidatedJson(content): ValidatedJson<CreateQuestionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .usecase
        .create_question(content)
        .await
        .map_err(|e| e.into_api_error(Endpoint::CreateQuestion))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Question created successfully.")),
    ))
}

/// GET /questions/{id}
#[utoipa::path(
   get,
   path = "/questions/{id}",
   tag = "questions",
   params(("id" = i64, Path, description = "質問 ID")),
   responses(
      (status = 200, description = "質問", body = ApiResponse<QuestionDto>),
      (status = 404, description = "質問が存在しない", body = MessageResponse),
      (status = 500, description = "データベースエラー", body = MessageResponse)
   )
)]
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn get_question(
    State(state): State<Arc<QuestionState>>,
    path: QuestionIdPath,
) -> Result<impl IntoResponse, ApiError> {
    let endpoint = Endpoint::GetQuestion;
    let id = resolve_id(path, endpoint)?;

    let question = state
        .usecase
        .get_question(id)
        .await
        .map_err(|e| e.into_api_error(endpoint))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(
            "Successfully retrieved the question",
            QuestionDto::from(&question),
        )),
    ))
}

/// PUT /questions/{id}
///
/// ボディの検証は存在確認より先に行う。
#[utoipa::path(
   put,
   path = "/questions/{id}",
   tag = "questions",
   params(("id" = i64, Path, description = "質問 ID")),
   request_body = UpdateQuestionRequest,
   responses(
      (status = 200, description = "更新成功", body = MessageResponse),
      (status = 400, description = "必須フィールドの欠落", body = MessageResponse),
      (status = 404, description = "質問が存在しない", body = MessageResponse),
      (status = 500, description = "データベースエラー", body = MessageResponse)
   )
)]
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn update_question(
    State(state): State<Arc<QuestionState>>,
    path: QuestionIdPath,
    ValidatedJson(content): ValidatedJson<UpdateQuestionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let endpoint = Endpoint::UpdateQuestion;
    let id = resolve_id(path, endpoint)?;

    state
        .usecase
        .update_question(id, content)
        .await
        .map_err(|e| e.into_api_error(endpoint))?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("Successfully updated the question.")),
    ))
}

/// DELETE /questions/{id}
#[utoipa::path(
   delete,
   path = "/questions/{id}",
   tag = "questions",
   params(("id" = i64, Path, description = "質問 ID")),
   responses(
      (status = 200, description = "削除成功", body = MessageResponse),
      (status = 404, description = "質問が存在しない", body = MessageResponse),
      (status = 500, description = "データベースエラー", body = MessageResponse)
   )
)]
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn delete_question(
    State(state): State<Arc<QuestionState>>,
    path: QuestionIdPath,
) -> Result<impl IntoResponse, ApiError> {
    let endpoint = Endpoint::DeleteQuestion;
    let id = resolve_id(path, endpoint)?;

    state
        .usecase
        .delete_question(id)
        .await
        .map_err(|e| e.into_api_error(endpoint))?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new(
            "Question and its answers deleted successfully.",
        )),
    ))
}

/// POST /questions/{id}/answers
///
/// 親の質問が存在しない場合は 404 ではなく 400 を返す。
#[utoipa::path(
   post,
   path = "/questions/{id}/answers",
   tag = "answers",
   params(("id" = i64, Path, description = "質問 ID")),
   request_body = CreateAnswerRequest,
   responses(
      (status = 201, description = "作成された回答", body = ApiResponse<AnswerDto>),
      (status = 400, description = "必須フィールドの欠落、または質問が存在しない", body = MessageResponse),
      (status = 500, description = "データベースエラー", body = MessageResponse)
   )
)]
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn create_answer(
    State(state): State<Arc<QuestionState>>,
    path: QuestionIdPath,
    ValidatedJson(content): ValidatedJson<CreateAnswerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let endpoint = Endpoint::CreateAnswer;
    let question_id = resolve_id(path, endpoint)?;

    let answer = state
        .usecase
        .create_answer(question_id, content)
        .await
        .map_err(|e| e.into_api_error(endpoint))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "Answer created successfully.",
            AnswerDto::from(&answer),
        )),
    ))
}

/// GET /questions/{id}/answers
///
/// 回答が 1 件もなければ 404（質問自体の有無は区別しない）。
#[utoipa::path(
   get,
   path = "/questions/{id}/answers",
   tag = "answers",
   params(("id" = i64, Path, description = "質問 ID")),
   responses(
      (status = 200, description = "回答一覧", body = ApiResponse<Vec<AnswerDto>>),
      (status = 404, description = "回答がない", body = MessageResponse),
      (status = 500, description = "データベースエラー", body = MessageResponse)
   )
)]
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn list_answers(
    State(state): State<Arc<QuestionState>>,
    path: QuestionIdPath,
) -> Result<impl IntoResponse, ApiError> {
    let endpoint = Endpoint::ListAnswers;
    let question_id = resolve_id(path, endpoint)?;

    let answers = state
        .usecase
        .list_answers(question_id)
        .await
        .map_err(|e| e.into_api_error(endpoint))?;
    if answers.is_empty() {
        return Err(endpoint.missing());
    }

    let data: Vec<AnswerDto> = answers.iter().map(AnswerDto::from).collect();
    Ok((
        StatusCode::OK,
        Json(ApiResponse::new("Successfully retrieved the answers.", data)),
    ))
}

/// POST /questions/{id}/upvote
#[utoipa::path(
   post,
   path = "/questions/{id}/upvote",
   tag = "votes",
   params(("id" = i64, Path, description = "質問 ID")),
   responses(
      (status = 200, description = "投票後の集計値", body = ApiResponse<QuestionVoteSummary>),
      (status = 404, description = "質問が存在しない", body = MessageResponse),
      (status = 500, description = "データベースエラー", body = MessageResponse)
   )
)]
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn upvote_question(
    State(state): State<Arc<QuestionState>>,
    path: QuestionIdPath,
) -> Result<impl IntoResponse, ApiError> {
    vote_question(&state, path, Vote::Up, "Successfully upvoted the question.").await
}

/// POST /questions/{id}/downvote
#[utoipa::path(
   post,
   path = "/questions/{id}/downvote",
   tag = "votes",
   params(("id" = i64, Path, description = "質問 ID")),
   responses(
      (status = 200, description = "投票後の集計値", body = ApiResponse<QuestionVoteSummary>),
      (status = 404, description = "質問が存在しない", body = MessageResponse),
      (status = 500, description = "データベースエラー", body = MessageResponse)
   )
)]
#[tracing::instrument(skip_all, fields(id = tracing::field::Empty))]
pub async fn downvote_question(
    State(state): State<Arc<QuestionState>>,
    path: QuestionIdPath,
) -> Result<impl IntoResponse, ApiError> {
    vote_question(
        &state,
        path,
        Vote::Down,
        "Successfully downvoted the question.",
    )
    .await
}

async fn vote_question(
    state: &QuestionState,
    path: QuestionIdPath,
    vote: Vote,
    message: &'static str,
) -> Result<(StatusCode, Json<ApiResponse<QuestionVoteSummary>>), ApiError> {
    let endpoint = Endpoint::VoteQuestion;
    let id = resolve_id(path, endpoint)?;

    let voted = state
        .usecase
        .vote_question(id, vote)
        .await
        .map_err(|e| e.into_api_error(endpoint))?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(
            message,
            QuestionVoteSummary::from(&voted),
        )),
    ))
}
