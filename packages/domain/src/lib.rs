//! # Toiboard ドメイン層
//!
//! Q&A フォーラムの中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: データベースが採番する ID を持つ [`question::Question`] と [`answer::Answer`]
//! - **値オブジェクト**: 検証済みの入力（[`question::QuestionContent`] など）と投票（[`vote::Vote`]）
//! - **ドメインエラー**: 入力検証の失敗を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB）には一切依存しない。
//!
//! ## 使用例
//!
//! ```rust
//! use toiboard_domain::question::QuestionContent;
//!
//! let content = QuestionContent::new("Rust の所有権", "move と borrow の違いは?", "rust")?;
//! assert_eq!(content.category(), "rust");
//! # Ok::<(), toiboard_domain::DomainError>(())
//! ```

#[macro_use]
mod macros;

pub mod answer;
pub mod clock;
pub mod error;
pub mod question;
pub mod vote;

pub use error::DomainError;
