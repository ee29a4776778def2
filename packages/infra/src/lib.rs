//! # Toiboard インフラ層
//!
//! PostgreSQL への接続と、ドメインモデルの永続化を担当する。
//!
//! ## 責務
//!
//! - **データベース接続**: 接続プールの作成とトランザクション管理
//! - **リポジトリ実装**: 質問・回答・投票の読み書き
//! - **テスト用実装**: `test-utils` feature 有効時のインメモリリポジトリ
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - 接続プールと [`db::TxContext`]
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリトレイトと PostgreSQL 実装
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use toiboard_infra::{db, repository::{PostgresQuestionRepository, QuestionRepository}};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/toiboard", 10).await?;
//!     let questions = PostgresQuestionRepository::new(pool).find_all().await?;
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::InfraError;
