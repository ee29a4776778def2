//! 回答への投票ユースケース

use std::sync::Arc;

use toiboard_domain::{
    answer::AnswerId,
    vote::{Vote, VotedAnswer},
};
use toiboard_infra::{
    db::TransactionManager,
    repository::{AnswerRepository, VoteRepository},
};

use crate::error::ForumError;

/// 回答ユースケース
pub struct AnswerUseCaseImpl {
    answer_repository: Arc<dyn AnswerRepository>,
    vote_repository:   Arc<dyn VoteRepository>,
    tx_manager:        Arc<dyn TransactionManager>,
}

impl AnswerUseCaseImpl {
    pub fn new(
        answer_repository: Arc<dyn AnswerRepository>,
        vote_repository: Arc<dyn VoteRepository>,
        tx_manager: Arc<dyn TransactionManager>,
    ) -> Self {
        Self {
            answer_repository,
            vote_repository,
            tx_manager,
        }
    }

    /// 回答に 1 票を投じ、投票後の集計値を返す
    ///
    /// 反対票は件数で集計される（質問とは異なる）。
    pub async fn vote_answer(&self, id: AnswerId, vote: Vote) -> Result<VotedAnswer, ForumError> {
        let mut tx = self.tx_manager.begin().await?;
        let Some(answer) = self.answer_repository.lock_by_id(&mut tx, id).await? else {
            return Err(ForumError::AnswerNotFound(id));
        };
        self.vote_repository
            .record_answer_vote(&mut tx, id, vote)
            .await?;
        let tally = self.vote_repository.answer_tally(&mut tx, id).await?;
        tx.commit().await?;

        Ok(VotedAnswer { answer, tally })
    }
}
