//! # リポジトリ実装
//!
//! 質問・回答・投票の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **トレイトと実装の分離**: ユースケースは `Arc<dyn ...Repository>` に依存し、
//!   テストではインメモリ実装（`crate::mock`）に差し替える
//! - **書き込みは TxContext 必須**: 書き込みと行ロックは `&mut TxContext` を受け取る
//! - **パラメータ化クエリ**: すべての値は `bind` で渡す

pub mod answer_repository;
pub mod question_repository;
pub mod vote_repository;

pub use answer_repository::{AnswerRepository, PostgresAnswerRepository};
pub use question_repository::{PostgresQuestionRepository, QuestionRepository};
pub use vote_repository::{PostgresVoteRepository, VoteRepository};
