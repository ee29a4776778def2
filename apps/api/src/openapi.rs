//! # OpenAPI 仕様定義
//!
//! utoipa を使用して API の OpenAPI 仕様を Rust の型から自動生成する。
//! `ApiDoc::openapi()` で OpenAPI ドキュメントを取得でき、
//! サーバーは `GET /api-docs/openapi.json` で配信する。

use axum::Json;
use utoipa::OpenApi;

use crate::handler::{answer, health, question};

#[derive(OpenApi)]
#[openapi(
   info(
      title = "Toiboard API",
      version = "0.1.0",
      description = "質問・回答・投票を扱う Q&A フォーラムの API"
   ),
   paths(
      // health
      health::health_check,
      health::api_check,
      // questions
      question::list_questions,
      question::search_questions,
      question::create_question,
      question::get_question,
      question::update_question,
      question::delete_question,
      // answers
      question::create_answer,
      question::list_answers,
      // votes
      question::upvote_question,
      question::downvote_question,
      answer::upvote_answer,
      answer::downvote_answer,
   ),
   components(schemas(
      toiboard_shared::MessageResponse,
   )),
   tags(
      (name = "health", description = "ヘルスチェック"),
      (name = "questions", description = "質問"),
      (name = "answers", description = "回答"),
      (name = "votes", description = "投票"),
   )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
