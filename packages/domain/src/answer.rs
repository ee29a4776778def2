//! # 回答
//!
//! 質問に対する回答。回答は常にちょうど 1 つの質問に属し、
//! 親の質問が削除されると一緒に削除される。
//!
//! 回答には作成日時を持たせていない。一覧は ID の昇順（作成順）で返す。

use crate::{DomainError, question::QuestionId};

define_serial_id! {
    /// 回答の一意識別子
    pub struct AnswerId;
}

/// 回答の本文
///
/// 空文字列は許可しない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerContent(String);

impl AnswerContent {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation("content は必須です".to_string()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// まだ ID が採番されていない回答
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    question_id: QuestionId,
    content:     AnswerContent,
}

impl NewAnswer {
    pub fn new(question_id: QuestionId, content: AnswerContent) -> Self {
        Self {
            question_id,
            content,
        }
    }

    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    pub fn content(&self) -> &AnswerContent {
        &self.content
    }
}

/// 回答エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    id:          AnswerId,
    question_id: QuestionId,
    content:     String,
}

impl Answer {
    /// 既存のデータから復元する
    pub fn from_db(id: AnswerId, question_id: QuestionId, content: String) -> Self {
        Self {
            id,
            question_id,
            content,
        }
    }

    pub fn id(&self) -> AnswerId {
        self.id
    }

    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_answer_content_空文字列はバリデーションエラー() {
        assert_eq!(
            AnswerContent::new(""),
            Err(DomainError::Validation("content は必須です".to_string()))
        );
    }

    #[test]
    fn test_answer_content_入力値をそのまま保持する() {
        let content = AnswerContent::new("  borrow checker  ").unwrap();

        assert_eq!(content.as_str(), "  borrow checker  ");
    }

    #[test]
    fn test_new_answer_親の質問idを保持する() {
        let new_answer = NewAnswer::new(
            QuestionId::from_i64(3),
            AnswerContent::new("回答").unwrap(),
        );

        assert_eq!(new_answer.question_id(), QuestionId::from_i64(3));
        assert_eq!(new_answer.content().as_str(), "回答");
    }
}
