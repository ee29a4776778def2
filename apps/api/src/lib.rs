//! # Toiboard API サーバー
//!
//! 質問・回答・投票を扱う Q&A フォーラムの HTTP API。
//!
//! ## アーキテクチャ
//!
//! ```text
//! handler（axum） ──▶ usecase ──▶ repository trait ──▶ PostgreSQL
//!     │                                 (toiboard_infra)
//!     └── validation（エクストラクタ）
//! ```
//!
//! ## モジュール構成
//!
//! - [`app`] - 依存の組み立てとルーター構築
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`openapi`] - OpenAPI 仕様
//! - [`usecase`] - トランザクション境界を持つユースケース
//! - [`validation`] - リクエストボディ・パスパラメータの検証
//!
//! ## 依存関係
//!
//! - `toiboard_domain`: ドメインモデル、エラー定義
//! - `toiboard_infra`: データベース接続、リポジトリ
//! - `toiboard_shared`: レスポンス型、オブザーバビリティ

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod openapi;
pub mod usecase;
pub mod validation;
