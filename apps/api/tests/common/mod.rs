//! API テストの共通ヘルパー
//!
//! 実際のルーター（`build_app`）をインメモリのリポジトリで組み立て、
//! `tower::ServiceExt::oneshot` でリクエストを送る。

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, Response, StatusCode, header},
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use toiboard_api::app::{AppComponents, build_app};
use toiboard_domain::clock::ManualClock;
use toiboard_infra::mock::{InMemoryForum, MockTransactionManager};
use tower::ServiceExt;

pub fn fixed_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// テスト対象のアプリケーション
pub struct TestApp {
    pub forum: InMemoryForum,
    pub clock: Arc<ManualClock>,
    router:    Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_forum(InMemoryForum::new())
    }

    /// すべてのリポジトリ操作がデータベースエラーになるアプリケーション
    pub fn failing() -> Self {
        Self::with_forum(InMemoryForum::failing())
    }

    fn with_forum(forum: InMemoryForum) -> Self {
        let clock = Arc::new(ManualClock::new(fixed_now()));
        let router = build_app(AppComponents {
            question_repository: Arc::new(forum.clone()),
            answer_repository:   Arc::new(forum.clone()),
            vote_repository:     Arc::new(forum.clone()),
            tx_manager:          Arc::new(MockTransactionManager),
            clock:               clock.clone(),
        });
        Self {
            forum,
            clock,
            router,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method(Method::GET)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn post_empty(&self, uri: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn send_json(
        &self,
        method: Method,
        uri: &str,
        body: serde_json::Value,
    ) -> Response<Body> {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// 質問を作成し、採番された ID を返す
    pub async fn create_question(&self, title: &str, category: &str) -> i64 {
        let response = self
            .send_json(
                Method::POST,
                "/questions",
                serde_json::json!({
                    "title": title,
                    "description": "description",
                    "category": category,
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        // 作成 API は ID を返さないため、一覧の末尾（ID 昇順）から取得する
        let body: serde_json::Value = response_body(self.get("/questions").await).await;
        body["data"].as_array().unwrap().last().unwrap()["id"]
            .as_i64()
            .unwrap()
    }

    /// 回答を作成し、採番された ID を返す
    pub async fn create_answer(&self, question_id: i64, content: &str) -> i64 {
        let response = self
            .send_json(
                Method::POST,
                &format!("/questions/{question_id}/answers"),
                serde_json::json!({ "content": content }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: serde_json::Value = response_body(response).await;
        body["data"]["id"].as_i64().unwrap()
    }
}

/// レスポンスボディを JSON としてデシリアライズする
pub async fn response_body<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// `{ "message": ... }` の message を取り出す
pub async fn message_of(response: Response<Body>) -> String {
    let body: serde_json::Value = response_body(response).await;
    body["message"].as_str().unwrap().to_string()
}
