//! # アプリケーション構築
//!
//! 依存（リポジトリ・トランザクション管理・時計）から State と Router を組み立てる。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use sqlx::PgPool;
use toiboard_domain::clock::{Clock, SystemClock};
use toiboard_infra::{
    db::{PgTransactionManager, TransactionManager},
    repository::{
        AnswerRepository,
        PostgresAnswerRepository,
        PostgresQuestionRepository,
        PostgresVoteRepository,
        QuestionRepository,
        VoteRepository,
    },
};
use toiboard_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{
        AnswerState,
        QuestionState,
        api_check,
        create_answer,
        create_question,
        delete_question,
        downvote_answer,
        downvote_question,
        get_question,
        health_check,
        list_answers,
        list_questions,
        search_questions,
        update_question,
        upvote_answer,
        upvote_question,
    },
    openapi::openapi_json,
    usecase::{AnswerUseCaseImpl, QuestionUseCaseImpl},
};

/// ルーター構築に必要な依存一式
#[derive(Clone)]
pub struct AppComponents {
    pub question_repository: Arc<dyn QuestionRepository>,
    pub answer_repository:   Arc<dyn AnswerRepository>,
    pub vote_repository:     Arc<dyn VoteRepository>,
    pub tx_manager:          Arc<dyn TransactionManager>,
    pub clock:               Arc<dyn Clock>,
}

impl AppComponents {
    /// PostgreSQL 実装で依存を組み立てる
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            question_repository: Arc::new(PostgresQuestionRepository::new(pool.clone())),
            answer_repository:   Arc::new(PostgresAnswerRepository::new(pool.clone())),
            vote_repository:     Arc::new(PostgresVoteRepository::new()),
            tx_manager:          Arc::new(PgTransactionManager::new(pool)),
            clock:               Arc::new(SystemClock),
        }
    }
}

/// State の構築とルーター定義を行う
pub fn build_app(components: AppComponents) -> Router {
    let question_state = Arc::new(QuestionState {
        usecase: QuestionUseCaseImpl::new(
            components.question_repository,
            components.answer_repository.clone(),
            components.vote_repository.clone(),
            components.tx_manager.clone(),
            components.clock,
        ),
    });

    let answer_state = Arc::new(AnswerState {
        usecase: AnswerUseCaseImpl::new(
            components.answer_repository,
            components.vote_repository,
            components.tx_manager,
        ),
    });

    // `/questions/search` は `/questions/{id}` より優先される（静的セグメント優先）
    Router::new()
        .route("/health", get(health_check))
        .route("/test", get(api_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(
            Router::new()
                .route("/questions", get(list_questions).post(create_question))
                .route("/questions/search", get(search_questions))
                .route(
                    "/questions/{id}",
                    get(get_question)
                        .put(update_question)
                        .delete(delete_question),
                )
                .route(
                    "/questions/{id}/answers",
                    get(list_answers).post(create_answer),
                )
                .route("/questions/{id}/upvote", post(upvote_question))
                .route("/questions/{id}/downvote", post(downvote_question))
                .with_state(question_state),
        )
        .merge(
            Router::new()
                .route("/answers/{id}/upvote", post(upvote_answer))
                .route("/answers/{id}/downvote", post(downvote_answer))
                .with_state(answer_state),
        )
        // Request ID レイヤー（下に書いたものが外側）
        // 1. SetRequestIdLayer: UUID v7 を生成（またはクライアント提供値を使用）
        // 2. TraceLayer: request_id を含むスパンを作成
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
