//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するエンティティ生成ヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use toiboard_domain::{
    answer::{Answer, AnswerContent, NewAnswer},
    question::{NewQuestion, Question, QuestionContent, QuestionId},
};
use toiboard_infra::{
    db::{PgTransactionManager, TransactionManager, TxContext},
    repository::{
        AnswerRepository,
        PostgresAnswerRepository,
        PostgresQuestionRepository,
        QuestionRepository,
    },
};

/// テスト用の固定日時
///
/// TIMESTAMPTZ はマイクロ秒精度のため、秒単位の値を使う。
pub fn test_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// トランザクションを開始する
pub async fn begin(pool: &PgPool) -> TxContext {
    PgTransactionManager::new(pool.clone())
        .begin()
        .await
        .unwrap()
}

/// 質問を 1 件作成してコミットする
pub async fn insert_question(pool: &PgPool, title: &str, category: &str) -> Question {
    let content = QuestionContent::new(title, "テスト用の説明", category).unwrap();
    let mut tx = begin(pool).await;
    let question = PostgresQuestionRepository::new(pool.clone())
        .insert(&mut tx, &NewQuestion::new(content, test_now()))
        .await
        .unwrap();
    tx.commit().await.unwrap();
    question
}

/// 回答を 1 件作成してコミットする
pub async fn insert_answer(pool: &PgPool, question_id: QuestionId, content: &str) -> Answer {
    let new_answer = NewAnswer::new(question_id, AnswerContent::new(content).unwrap());
    let mut tx = begin(pool).await;
    let answer = PostgresAnswerRepository::new(pool.clone())
        .insert(&mut tx, &new_answer)
        .await
        .unwrap();
    tx.commit().await.unwrap();
    answer
}
