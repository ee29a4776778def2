//! # ユースケース層
//!
//! リポジトリを組み合わせて 1 リクエスト分の処理を行う。
//! 書き込みを伴う処理は 1 つのトランザクションで実行し、親の行をロックしてから書き込む。

pub mod answer;
pub mod question;

pub use answer::AnswerUseCaseImpl;
pub use question::QuestionUseCaseImpl;
