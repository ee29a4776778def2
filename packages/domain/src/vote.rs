//! # 投票
//!
//! 質問と回答への賛成票・反対票。
//!
//! 1 票は 1 行として追記され、誰が投じたかは記録しない。同じ対象に何度でも投票できる。
//! 投票後のレスポンスでは対象の集計値（[`VoteTally`]）を返す。
//!
//! ## 反対票の集計規則
//!
//! 反対票の数え方は対象によって異なる。既存クライアントがこの表現に依存しているため、
//! 揃えずにそのまま維持する。
//!
//! | 対象 | `upvotes` | `downvotes` |
//! |------|-----------|-------------|
//! | 質問 | 賛成票の数 N | 反対票の符号付き合計 −M |
//! | 回答 | 賛成票の数 N | 反対票の数 M |
//!
//! ```rust
//! use toiboard_domain::vote::{DownvoteConvention, Vote, VoteTally};
//!
//! let votes = [Vote::Up, Vote::Down, Vote::Down];
//!
//! let question = VoteTally::from_votes(votes, DownvoteConvention::SignedSum);
//! assert_eq!((question.upvotes(), question.downvotes()), (1, -2));
//!
//! let answer = VoteTally::from_votes(votes, DownvoteConvention::Count);
//! assert_eq!((answer.upvotes(), answer.downvotes()), (1, 2));
//! ```

use crate::{answer::Answer, question::Question};

/// 1 票の向き
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vote {
    Up,
    Down,
}

impl Vote {
    /// 永続化時の値（+1 / -1）
    pub fn value(self) -> i16 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// 反対票の集計規則
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownvoteConvention {
    /// 反対票の値（-1）をそのまま合計する。質問で使う
    SignedSum,
    /// 反対票の件数を数える。回答で使う
    Count,
}

/// 投票の集計値
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteTally {
    upvotes:   i64,
    downvotes: i64,
}

impl VoteTally {
    pub fn new(upvotes: i64, downvotes: i64) -> Self {
        Self { upvotes, downvotes }
    }

    /// 票の列を規則に従って集計する
    pub fn from_votes(
        votes: impl IntoIterator<Item = Vote>,
        convention: DownvoteConvention,
    ) -> Self {
        let downvote_weight = match convention {
            DownvoteConvention::SignedSum => -1,
            DownvoteConvention::Count => 1,
        };
        votes
            .into_iter()
            .fold(Self::default(), |tally, vote| match vote {
                Vote::Up => Self {
                    upvotes: tally.upvotes + 1,
                    ..tally
                },
                Vote::Down => Self {
                    downvotes: tally.downvotes + downvote_weight,
                    ..tally
                },
            })
    }

    pub fn upvotes(&self) -> i64 {
        self.upvotes
    }

    pub fn downvotes(&self) -> i64 {
        self.downvotes
    }
}

/// 集計値付きの質問
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotedQuestion {
    pub question: Question,
    pub tally:    VoteTally,
}

/// 集計値付きの回答
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotedAnswer {
    pub answer: Answer,
    pub tally:  VoteTally,
}
