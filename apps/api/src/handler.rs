//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、入力の変換とレスポンスの組み立てのみを行う
//!
//! ## モジュール構成
//!
//! ```text
//! handler.rs            # 親モジュール（re-export）
//! └── handler/
//!     ├── answer.rs     # 回答への投票
//!     ├── health.rs     # ヘルスチェック、疎通確認
//!     └── question.rs   # 質問 CRUD、検索、回答の作成・一覧、質問への投票
//! ```

pub mod answer;
pub mod health;
pub mod question;

pub use answer::{AnswerState, downvote_answer, upvote_answer};
pub use health::{api_check, health_check};
pub use question::{
    QuestionState,
    create_answer,
    create_question,
    delete_question,
    downvote_question,
    get_question,
    list_answers,
    list_questions,
    search_questions,
    update_question,
    upvote_question,
};
