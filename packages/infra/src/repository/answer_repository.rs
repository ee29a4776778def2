//! # AnswerRepository
//!
//! `answers` テーブルの読み書きを担当するリポジトリ。

use async_trait::async_trait;
use sqlx::PgPool;
use toiboard_domain::{
    answer::{Answer, AnswerId, NewAnswer},
    question::QuestionId,
};

use crate::{db::TxContext, error::InfraError};

/// 回答リポジトリトレイト
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// 質問に紐づく回答を作成順で取得する
    async fn find_by_question(&self, question_id: QuestionId) -> Result<Vec<Answer>, InfraError>;

    /// トランザクション内で回答の行をロックして取得する
    async fn lock_by_id(
        &self,
        tx: &mut TxContext,
        id: AnswerId,
    ) -> Result<Option<Answer>, InfraError>;

    /// 回答を挿入し、採番された ID を含む行を返す
    ///
    /// 親の質問の存在確認は呼び出し側が同じトランザクション内で行う。
    async fn insert(&self, tx: &mut TxContext, answer: &NewAnswer) -> Result<Answer, InfraError>;
}

struct AnswerRow {
    id:          i64,
    question_id: i64,
    content:     String,
}

impl From<AnswerRow> for Answer {
    fn from(row: AnswerRow) -> Self {
        Answer::from_db(
            AnswerId::from_i64(row.id),
            QuestionId::from_i64(row.question_id),
            row.content,
        )
    }
}

/// PostgreSQL 実装の AnswerRepository
#[derive(Debug, Clone)]
pub struct PostgresAnswerRepository {
    pool: PgPool,
}

impl PostgresAnswerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnswerRepository for PostgresAnswerRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%question_id))]
    async fn find_by_question(&self, question_id: QuestionId) -> Result<Vec<Answer>, InfraError> {
        let rows = sqlx::query_as!(
            AnswerRow,
            r#"
            SELECT id, question_id, content
            FROM answers
            WHERE question_id = $1
            ORDER BY id ASC
            "#,
            question_id.as_i64()
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Answer::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn lock_by_id(
        &self,
        tx: &mut TxContext,
        id: AnswerId,
    ) -> Result<Option<Answer>, InfraError> {
        let row = sqlx::query_as!(
            AnswerRow,
            r#"
            SELECT id, question_id, content
            FROM answers
            WHERE id = $1
            FOR UPDATE
            "#,
            id.as_i64()
        )
        .fetch_optional(tx.conn()?)
        .await?;

        Ok(row.map(Answer::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(question_id = %answer.question_id()))]
    async fn insert(&self, tx: &mut TxContext, answer: &NewAnswer) -> Result<Answer, InfraError> {
        let row = sqlx::query_as!(
            AnswerRow,
            r#"
            INSERT INTO answers (question_id, content)
            VALUES ($1, $2)
            RETURNING id as "id!", question_id as "question_id!", content as "content!"
            "#,
            answer.question_id().as_i64(),
            answer.content().as_str()
        )
        .fetch_one(tx.conn()?)
        .await?;

        Ok(row.into())
    }
}
