//! # VoteRepository
//!
//! 投票ログ（`question_votes` / `answer_votes`）への追記と集計を担当するリポジトリ。
//!
//! 集計値はエンティティの行には保存せず、毎回ログ全体から集計クエリで求める。
//! 反対票の数え方は質問と回答で異なる（[`toiboard_domain::vote`] を参照）。
//!
//! 追記と集計は同じトランザクションで行い、追記した 1 票を含む集計値を返す。

use async_trait::async_trait;
use toiboard_domain::{
    answer::AnswerId,
    question::QuestionId,
    vote::{Vote, VoteTally},
};

use crate::{db::TxContext, error::InfraError};

/// 投票リポジトリトレイト
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// 質問への 1 票を追記する
    async fn record_question_vote(
        &self,
        tx: &mut TxContext,
        question_id: QuestionId,
        vote: Vote,
    ) -> Result<(), InfraError>;

    /// 質問の集計値を求める（反対票は符号付き合計）
    async fn question_tally(
        &self,
        tx: &mut TxContext,
        question_id: QuestionId,
    ) -> Result<VoteTally, InfraError>;

    /// 回答への 1 票を追記する
    async fn record_answer_vote(
        &self,
        tx: &mut TxContext,
        answer_id: AnswerId,
        vote: Vote,
    ) -> Result<(), InfraError>;

    /// 回答の集計値を求める（反対票は件数）
    async fn answer_tally(
        &self,
        tx: &mut TxContext,
        answer_id: AnswerId,
    ) -> Result<VoteTally, InfraError>;
}

/// 集計クエリの結果
struct TallyRow {
    upvotes:   i64,
    downvotes: i64,
}

impl From<TallyRow> for VoteTally {
    fn from(row: TallyRow) -> Self {
        VoteTally::new(row.upvotes, row.downvotes)
    }
}

/// PostgreSQL 実装の VoteRepository
///
/// プールは持たず、常に呼び出し側のトランザクションで実行する。
#[derive(Debug, Clone, Default)]
pub struct PostgresVoteRepository;

impl PostgresVoteRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VoteRepository for PostgresVoteRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%question_id, vote = vote.value()))]
    async fn record_question_vote(
        &self,
        tx: &mut TxContext,
        question_id: QuestionId,
        vote: Vote,
    ) -> Result<(), InfraError> {
        sqlx::query!(
            r#"
            INSERT INTO question_votes (question_id, vote)
            VALUES ($1, $2)
            "#,
            question_id.as_i64(),
            vote.value()
        )
        .execute(tx.conn()?)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%question_id))]
    async fn question_tally(
        &self,
        tx: &mut TxContext,
        question_id: QuestionId,
    ) -> Result<VoteTally, InfraError> {
        let row = sqlx::query_as!(
            TallyRow,
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN vote = 1 THEN 1 ELSE 0 END), 0)::bigint AS "upvotes!",
                COALESCE(SUM(CASE WHEN vote = -1 THEN -1 ELSE 0 END), 0)::bigint AS "downvotes!"
            FROM question_votes
            WHERE question_id = $1
            "#,
            question_id.as_i64()
        )
        .fetch_one(tx.conn()?)
        .await?;

        Ok(row.into())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%answer_id, vote = vote.value()))]
    async fn record_answer_vote(
        &self,
        tx: &mut TxContext,
        answer_id: AnswerId,
        vote: Vote,
    ) -> Result<(), InfraError> {
        sqlx::query!(
            r#"
            INSERT INTO answer_votes (answer_id, vote)
            VALUES ($1, $2)
            "#,
            answer_id.as_i64(),
            vote.value()
        )
        .execute(tx.conn()?)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%answer_id))]
    async fn answer_tally(
        &self,
        tx: &mut TxContext,
        answer_id: AnswerId,
    ) -> Result<VoteTally, InfraError> {
        let row = sqlx::query_as!(
            TallyRow,
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN vote = 1 THEN 1 ELSE 0 END), 0)::bigint AS "upvotes!",
                COALESCE(SUM(CASE WHEN vote = -1 THEN 1 ELSE 0 END), 0)::bigint AS "downvotes!"
            FROM answer_votes
            WHERE answer_id = $1
            "#,
            answer_id.as_i64()
        )
        .fetch_one(tx.conn()?)
        .await?;

        Ok(row.into())
    }
}
