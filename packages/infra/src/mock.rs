//! # テスト用モックリポジトリ
//!
//! ユースケース・ハンドラのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! toiboard-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! [`InMemoryForum`] は 3 つのリポジトリトレイトをすべて実装し、状態を共有する。
//! 検索の OR 判定や反対票の集計規則は SQL 実装と同じ結果になる。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use toiboard_domain::{
    answer::{Answer, AnswerId, NewAnswer},
    question::{NewQuestion, Question, QuestionContent, QuestionId, QuestionSearch},
    vote::{DownvoteConvention, Vote, VoteTally},
};

use crate::{
    db::{TransactionManager, TxContext},
    error::InfraError,
    repository::{AnswerRepository, QuestionRepository, VoteRepository},
};

#[derive(Default)]
struct ForumState {
    questions:        Vec<Question>,
    answers:          Vec<Answer>,
    question_votes:   Vec<(QuestionId, Vote)>,
    answer_votes:     Vec<(AnswerId, Vote)>,
    last_question_id: i64,
    last_answer_id:   i64,
}

// ===== InMemoryForum =====

#[derive(Clone, Default)]
pub struct InMemoryForum {
    state:   Arc<Mutex<ForumState>>,
    failing: bool,
}

impl InMemoryForum {
    pub fn new() -> Self {
        Self::default()
    }

    /// すべての呼び出しがデータベースエラーを返すインスタンスを作成する
    pub fn failing() -> Self {
        Self {
            state:   Arc::default(),
            failing: true,
        }
    }

    /// 保存されている質問の件数
    pub fn question_count(&self) -> usize {
        self.state.lock().unwrap().questions.len()
    }

    /// 保存されている回答の件数
    pub fn answer_count(&self) -> usize {
        self.state.lock().unwrap().answers.len()
    }

    /// 保存されている投票の件数（質問, 回答）
    pub fn vote_counts(&self) -> (usize, usize) {
        let state = self.state.lock().unwrap();
        (state.question_votes.len(), state.answer_votes.len())
    }

    fn check(&self) -> Result<(), InfraError> {
        if self.failing {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for InMemoryForum {
    async fn find_all(&self) -> Result<Vec<Question>, InfraError> {
        self.check()?;
        Ok(self.state.lock().unwrap().questions.clone())
    }

    async fn search(&self, criteria: &QuestionSearch) -> Result<Vec<Question>, InfraError> {
        self.check()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .questions
            .iter()
            .filter(|q| criteria.matches(q))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: QuestionId) -> Result<Option<Question>, InfraError> {
        self.check()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .questions
            .iter()
            .find(|q| q.id() == id)
            .cloned())
    }

    async fn lock_by_id(
        &self,
        _tx: &mut TxContext,
        id: QuestionId,
    ) -> Result<Option<Question>, InfraError> {
        QuestionRepository::find_by_id(self, id).await
    }

    async fn insert(
        &self,
        _tx: &mut TxContext,
        question: &NewQuestion,
    ) -> Result<Question, InfraError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.last_question_id += 1;
        let stored = Question::from_new(QuestionId::from_i64(state.last_question_id), question);
        state.questions.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        _tx: &mut TxContext,
        id: QuestionId,
        content: &QuestionContent,
        updated_at: DateTime<Utc>,
    ) -> Result<(), InfraError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        if let Some(slot) = state.questions.iter_mut().find(|q| q.id() == id) {
            *slot = slot.clone().replaced(content, updated_at);
        }
        Ok(())
    }

    async fn delete_with_answers(
        &self,
        _tx: &mut TxContext,
        id: QuestionId,
    ) -> Result<(), InfraError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let removed: Vec<AnswerId> = state
            .answers
            .iter()
            .filter(|a| a.question_id() == id)
            .map(Answer::id)
            .collect();
        state.answers.retain(|a| a.question_id() != id);
        state.answer_votes.retain(|(a, _)| !removed.contains(a));
        state.question_votes.retain(|(q, _)| *q != id);
        state.questions.retain(|q| q.id() != id);
        Ok(())
    }
}

#[async_trait]
impl AnswerRepository for InMemoryForum {
    async fn find_by_question(&self, question_id: QuestionId) -> Result<Vec<Answer>, InfraError> {
        self.check()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .answers
            .iter()
            .filter(|a| a.question_id() == question_id)
            .cloned()
            .collect())
    }

    async fn lock_by_id(
        &self,
        _tx: &mut TxContext,
        id: AnswerId,
    ) -> Result<Option<Answer>, InfraError> {
        self.check()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .answers
            .iter()
            .find(|a| a.id() == id)
            .cloned())
    }

    async fn insert(&self, _tx: &mut TxContext, answer: &NewAnswer) -> Result<Answer, InfraError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.last_answer_id += 1;
        let stored = Answer::from_db(
            AnswerId::from_i64(state.last_answer_id),
            answer.question_id(),
            answer.content().as_str().to_string(),
        );
        state.answers.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl VoteRepository for InMemoryForum {
    async fn record_question_vote(
        &self,
        _tx: &mut TxContext,
        question_id: QuestionId,
        vote: Vote,
    ) -> Result<(), InfraError> {
        self.check()?;
        self.state
            .lock()
            .unwrap()
            .question_votes
            .push((question_id, vote));
        Ok(())
    }

    async fn question_tally(
        &self,
        _tx: &mut TxContext,
        question_id: QuestionId,
    ) -> Result<VoteTally, InfraError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        let votes = state
            .question_votes
            .iter()
            .filter(|(id, _)| *id == question_id)
            .map(|(_, vote)| *vote);
        Ok(VoteTally::from_votes(votes, DownvoteConvention::SignedSum))
    }

    async fn record_answer_vote(
        &self,
        _tx: &mut TxContext,
        answer_id: AnswerId,
        vote: Vote,
    ) -> Result<(), InfraError> {
        self.check()?;
        self.state
            .lock()
            .unwrap()
            .answer_votes
            .push((answer_id, vote));
        Ok(())
    }

    async fn answer_tally(
        &self,
        _tx: &mut TxContext,
        answer_id: AnswerId,
    ) -> Result<VoteTally, InfraError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        let votes = state
            .answer_votes
            .iter()
            .filter(|(id, _)| *id == answer_id)
            .map(|(_, vote)| *vote);
        Ok(VoteTally::from_votes(votes, DownvoteConvention::Count))
    }
}

// ===== MockTransactionManager =====

/// 何もしない TransactionManager
///
/// `begin()` は常に `TxContext::mock()` を返す。
#[derive(Clone, Default)]
pub struct MockTransactionManager;

#[async_trait]
impl TransactionManager for MockTransactionManager {
    async fn begin(&self) -> Result<TxContext, InfraError> {
        Ok(TxContext::mock())
    }
}
