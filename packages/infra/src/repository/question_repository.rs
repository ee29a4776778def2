//! # QuestionRepository
//!
//! `questions` テーブルの読み書きを担当するリポジトリ。
//!
//! 一覧と検索は ID の昇順（作成順）で返す。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use toiboard_domain::question::{
    NewQuestion,
    Question,
    QuestionContent,
    QuestionId,
    QuestionSearch,
};

use crate::{db::TxContext, error::InfraError};

/// 質問リポジトリトレイト
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// すべての質問を取得する
    async fn find_all(&self) -> Result<Vec<Question>, InfraError>;

    /// タイトルまたはカテゴリが部分一致する質問を取得する
    async fn search(&self, criteria: &QuestionSearch) -> Result<Vec<Question>, InfraError>;

    /// ID で質問を検索する
    async fn find_by_id(&self, id: QuestionId) -> Result<Option<Question>, InfraError>;

    /// トランザクション内で質問の行をロックして取得する
    ///
    /// 存在しなければ `None`。ロックはトランザクション終了まで保持される。
    async fn lock_by_id(
        &self,
        tx: &mut TxContext,
        id: QuestionId,
    ) -> Result<Option<Question>, InfraError>;

    /// 質問を挿入し、採番された ID を含む行を返す
    async fn insert(
        &self,
        tx: &mut TxContext,
        question: &NewQuestion,
    ) -> Result<Question, InfraError>;

    /// タイトル・説明・カテゴリを全置換し、`updated_at` を更新する
    async fn update(
        &self,
        tx: &mut TxContext,
        id: QuestionId,
        content: &QuestionContent,
        updated_at: DateTime<Utc>,
    ) -> Result<(), InfraError>;

    /// 質問と、その質問に紐づく回答を削除する
    async fn delete_with_answers(&self, tx: &mut TxContext, id: QuestionId)
    -> Result<(), InfraError>;
}

/// `questions` テーブルの行
///
/// `query_as!` の結果をそのまま受け、[`Question::from_db`] に渡す。
struct QuestionRow {
    id:          i64,
    title:       String,
    description: String,
    category:    String,
    created_at:  DateTime<Utc>,
    updated_at:  DateTime<Utc>,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Question::from_db(
            QuestionId::from_i64(row.id),
            row.title,
            row.description,
            row.category,
            row.created_at,
            row.updated_at,
        )
    }
}

/// PostgreSQL 実装の QuestionRepository
#[derive(Debug, Clone)]
pub struct PostgresQuestionRepository {
    pool: PgPool,
}

impl PostgresQuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for PostgresQuestionRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Question>, InfraError> {
        let rows = sqlx::query_as!(
            QuestionRow,
            r#"
            SELECT id, title, description, category, created_at, updated_at
            FROM questions
            ORDER BY id ASC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Question::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn search(&self, criteria: &QuestionSearch) -> Result<Vec<Question>, InfraError> {
        // 省略された条件は NULL が渡り、`LIKE NULL` は一致しない
        let rows = sqlx::query_as!(
            QuestionRow,
            r#"
            SELECT id, title, description, category, created_at, updated_at
            FROM questions
            WHERE title LIKE $1::text OR category LIKE $2::text
            ORDER BY id ASC
            "#,
            criteria.title_pattern(),
            criteria.category_pattern()
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Question::from).collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: QuestionId) -> Result<Option<Question>, InfraError> {
        let row = sqlx::query_as!(
            QuestionRow,
            r#"
            SELECT id, title, description, category, created_at, updated_at
            FROM questions
            WHERE id = $1
            "#,
            id.as_i64()
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Question::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn lock_by_id(
        &self,
        tx: &mut TxContext,
        id: QuestionId,
    ) -> Result<Option<Question>, InfraError> {
        let row = sqlx::query_as!(
            QuestionRow,
            r#"
            SELECT id, title, description, category, created_at, updated_at
            FROM questions
            WHERE id = $1
            FOR UPDATE
            "#,
            id.as_i64()
        )
        .fetch_optional(tx.conn()?)
        .await?;

        Ok(row.map(Question::from))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(
        &self,
        tx: &mut TxContext,
        question: &NewQuestion,
    ) -> Result<Question, InfraError> {
        let content = question.content();
        let row = sqlx::query_as!(
            QuestionRow,
            r#"
            INSERT INTO questions (title, description, category, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING
                id as "id!",
                title as "title!",
                description as "description!",
                category as "category!",
                created_at as "created_at!",
                updated_at as "updated_at!"
            "#,
            content.title(),
            content.description(),
            content.category(),
            question.created_at(),
            question.updated_at()
        )
        .fetch_one(tx.conn()?)
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(
        &self,
        tx: &mut TxContext,
        id: QuestionId,
        content: &QuestionContent,
        updated_at: DateTime<Utc>,
    ) -> Result<(), InfraError> {
        sqlx::query!(
            r#"
            UPDATE questions
            SET title = $2, description = $3, category = $4, updated_at = $5
            WHERE id = $1
            "#,
            id.as_i64(),
            content.title(),
            content.description(),
            content.category(),
            updated_at
        )
        .execute(tx.conn()?)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete_with_answers(
        &self,
        tx: &mut TxContext,
        id: QuestionId,
    ) -> Result<(), InfraError> {
        // 回答が 0 件でも質問は削除する。投票ログは外部キーの ON DELETE CASCADE で消える
        sqlx::query!(
            r#"
            WITH deleted_answers AS (
                DELETE FROM answers WHERE question_id = $1
            )
            DELETE FROM questions WHERE id = $1
            "#,
            id.as_i64()
        )
        .execute(tx.conn()?)
        .await?;

        Ok(())
    }
}
