//! # ドメイン層エラー
//!
//! ドメインモデルの生成時に不変条件を満たさなかったことを表す。
//! 存在しないエンティティはユースケースの関心なので、ここでは扱わない。

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// 必須フィールドが空文字列だった
    ///
    /// 長さや形式の検証は行わないため、これ以外の理由では発生しない。
    #[error("バリデーションエラー: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_validationはメッセージを含めて表示する() {
        let error = DomainError::Validation("title は必須です".to_string());

        assert_eq!(error.to_string(), "バリデーションエラー: title は必須です");
    }
}
