//! 質問とその配下（回答の作成・一覧、質問への投票）のユースケース

use std::sync::Arc;

use toiboard_domain::{
    answer::{Answer, AnswerContent, NewAnswer},
    clock::Clock,
    question::{NewQuestion, Question, QuestionContent, QuestionId, QuestionSearch},
    vote::{Vote, VotedQuestion},
};
use toiboard_infra::{
    db::TransactionManager,
    repository::{AnswerRepository, QuestionRepository, VoteRepository},
};

use crate::error::ForumError;

/// 質問ユースケース
pub struct QuestionUseCaseImpl {
    question_repository: Arc<dyn QuestionRepository>,
    answer_repository:   Arc<dyn AnswerRepository>,
    vote_repository:     Arc<dyn VoteRepository>,
    tx_manager:          Arc<dyn TransactionManager>,
    clock:               Arc<dyn Clock>,
}

impl QuestionUseCaseImpl {
    pub fn new(
        question_repository: Arc<dyn QuestionRepository>,
        answer_repository: Arc<dyn AnswerRepository>,
        vote_repository: Arc<dyn VoteRepository>,
        tx_manager: Arc<dyn TransactionManager>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            question_repository,
            answer_repository,
            vote_repository,
            tx_manager,
            clock,
        }
    }

    /// すべての質問を取得する
    pub async fn list_questions(&self) -> Result<Vec<Question>, ForumError> {
        Ok(self.question_repository.find_all().await?)
    }

    /// タイトルまたはカテゴリで検索する
    ///
    /// 一致がなければ空のベクタを返す。404 にするかどうかはハンドラが決める。
    pub async fn search_questions(
        &self,
        criteria: &QuestionSearch,
    ) -> Result<Vec<Question>, ForumError> {
        Ok(self.question_repository.search(criteria).await?)
    }

    pub async fn get_question(&self, id: QuestionId) -> Result<Question, ForumError> {
        self.question_repository
            .find_by_id(id)
            .await?
            .ok_or(ForumError::QuestionNotFound(id))
    }

    /// 質問を作成する
    ///
    /// `created_at` と `updated_at` は同じ時刻になる。
    pub async fn create_question(&self, content: QuestionContent) -> Result<Question, ForumError> {
        let new_question = NewQuestion::new(content, self.clock.now());

        let mut tx = self.tx_manager.begin().await?;
        let question = self
            .question_repository
            .insert(&mut tx, &new_question)
            .await?;
        tx.commit().await?;

        tracing::info!(question_id = %question.id(), "質問を作成しました");
        Ok(question)
    }

    /// 質問の 3 フィールドを全置換し、`updated_at` を進める
    pub async fn update_question(
        &self,
        id: QuestionId,
        content: QuestionContent,
    ) -> Result<(), ForumError> {
        let mut tx = self.tx_manager.begin().await?;
        if self
            .question_repository
            .lock_by_id(&mut tx, id)
            .await?
            .is_none()
        {
            return Err(ForumError::QuestionNotFound(id));
        }
        self.question_repository
            .update(&mut tx, id, &content, self.clock.now())
            .await?;
        tx.commit().await?;

        Ok(())
    }

    /// 質問と、その質問への回答を削除する
    pub async fn delete_question(&self, id: QuestionId) -> Result<(), ForumError> {
        let mut tx = self.tx_manager.begin().await?;
        if self
            .question_repository
            .lock_by_id(&mut tx, id)
            .await?
            .is_none()
        {
            return Err(ForumError::QuestionNotFound(id));
        }
        self.question_repository
            .delete_with_answers(&mut tx, id)
            .await?;
        tx.commit().await?;

        tracing::info!(question_id = %id, "質問を削除しました");
        Ok(())
    }

    /// 質問に回答を追加する
    pub async fn create_answer(
        &self,
        question_id: QuestionId,
        content: AnswerContent,
    ) -> Result<Answer, ForumError> {
        let mut tx = self.tx_manager.begin().await?;
        if self
            .question_repository
            .lock_by_id(&mut tx, question_id)
            .await?
            .is_none()
        {
            return Err(ForumError::QuestionNotFound(question_id));
        }
        let answer = self
            .answer_repository
            .insert(&mut tx, &NewAnswer::new(question_id, content))
            .await?;
        tx.commit().await?;

        tracing::info!(%question_id, answer_id = %answer.id(), "回答を作成しました");
        Ok(answer)
    }

    /// 質問への回答を作成順で取得する
    ///
    /// 質問が存在しない場合も空のベクタになる。
    pub async fn list_answers(&self, question_id: QuestionId) -> Result<Vec<Answer>, ForumError> {
        Ok(self
            .answer_repository
            .find_by_question(question_id)
            .await?)
    }

    /// 質問に 1 票を投じ、投票後の集計値を返す
    pub async fn vote_question(
        &self,
        id: QuestionId,
        vote: Vote,
    ) -> Result<VotedQuestion, ForumError> {
        let mut tx = self.tx_manager.begin().await?;
        let Some(question) = self.question_repository.lock_by_id(&mut tx, id).await? else {
            return Err(ForumError::QuestionNotFound(id));
        };
        self.vote_repository
            .record_question_vote(&mut tx, id, vote)
            .await?;
        let tally = self.vote_repository.question_tally(&mut tx, id).await?;
        tx.commit().await?;

        Ok(VotedQuestion { question, tally })
    }
}
