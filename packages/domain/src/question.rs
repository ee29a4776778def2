//! # 質問
//!
//! フォーラムの質問を表現するドメインモデル。
//!
//! ## ライフサイクル
//!
//! - 作成: `POST /questions`。`created_at` と `updated_at` は同じ時刻で打刻される
//! - 更新: `PUT /questions/{id}`。3 フィールドを全置換し、`updated_at` のみ進める
//! - 削除: `DELETE /questions/{id}`。紐づく回答もまとめて削除される
//!
//! 投票数は質問の行には保持しない（[`crate::vote`] を参照）。
//!
//! ## 使用例
//!
//! ```rust
//! use chrono::Utc;
//! use toiboard_domain::question::{NewQuestion, QuestionContent};
//!
//! let content = QuestionContent::new("所有権とは", "説明してください", "rust")?;
//! let new_question = NewQuestion::new(content, Utc::now());
//! assert_eq!(new_question.created_at(), new_question.updated_at());
//! # Ok::<(), toiboard_domain::DomainError>(())
//! ```

use chrono::{DateTime, Utc};

use crate::DomainError;

define_serial_id! {
    /// 質問の一意識別子
    pub struct QuestionId;
}

// =========================================================================
// QuestionContent（質問本文）
// =========================================================================

/// 質問の入力項目（タイトル・説明・カテゴリ）
///
/// # 不変条件
///
/// - 3 フィールドとも空文字列ではない
///
/// 前後の空白の除去や文字数制限は行わない。存在チェックのみ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionContent {
    title:       String,
    description: String,
    category:    String,
}

impl QuestionContent {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            title:       required("title", title.into())?,
            description: required("description", description.into())?,
            category:    required("category", category.into())?,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

fn required(field: &str, value: String) -> Result<String, DomainError> {
    if value.is_empty() {
        return Err(DomainError::Validation(format!("{field} は必須です")));
    }
    Ok(value)
}

// =========================================================================
// NewQuestion（作成前の質問）
// =========================================================================

/// まだ ID が採番されていない質問
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    content: QuestionContent,
    now:     DateTime<Utc>,
}

impl NewQuestion {
    pub fn new(content: QuestionContent, now: DateTime<Utc>) -> Self {
        Self { content, now }
    }

    pub fn content(&self) -> &QuestionContent {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.now
    }
}

// =========================================================================
// Question（質問エンティティ）
// =========================================================================

/// 質問エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id:          QuestionId,
    title:       String,
    description: String,
    category:    String,
    created_at:  DateTime<Utc>,
    updated_at:  DateTime<Utc>,
}

impl Question {
    /// 既存のデータから復元する
    pub fn from_db(
        id: QuestionId,
        title: String,
        description: String,
        category: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            category,
            created_at,
            updated_at,
        }
    }

    /// 採番済みの ID を付けて作成前の質問から組み立てる
    pub fn from_new(id: QuestionId, new_question: &NewQuestion) -> Self {
        let content = new_question.content();
        Self::from_db(
            id,
            content.title().to_string(),
            content.description().to_string(),
            content.category().to_string(),
            new_question.created_at(),
            new_question.updated_at(),
        )
    }

    /// 内容を全置換し、`updated_at` を進めた新しいインスタンスを返す
    pub fn replaced(self, content: &QuestionContent, now: DateTime<Utc>) -> Self {
        Self {
            title: content.title().to_string(),
            description: content.description().to_string(),
            category: content.category().to_string(),
            updated_at: now,
            ..self
        }
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// =========================================================================
// QuestionSearch（検索条件）
// =========================================================================

/// 質問の検索条件
///
/// タイトルとカテゴリの部分一致を **OR** で結合する。どちらか一方に一致すれば対象になる。
///
/// - 省略された条件はどの行にも一致しない（OR の片側が消える）
/// - 両方省略すると何にも一致しない
/// - 空文字列を指定すると `%%` となり、すべての行に一致する
///
/// パターン中の `%` と `_` はエスケープしない。利用者が指定すればワイルドカードとして働く。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSearch {
    title:    Option<String>,
    category: Option<String>,
}

impl QuestionSearch {
    pub fn new(title: Option<String>, category: Option<String>) -> Self {
        Self { title, category }
    }

    /// タイトルの LIKE パターン（`%title%`）
    pub fn title_pattern(&self) -> Option<String> {
        self.title.as_deref().map(substring_pattern)
    }

    /// カテゴリの LIKE パターン（`%category%`）
    pub fn category_pattern(&self) -> Option<String> {
        self.category.as_deref().map(substring_pattern)
    }

    /// インメモリでの一致判定
    ///
    /// ワイルドカードを含まない入力に対して、LIKE による判定と同じ結果になる。
    pub fn matches(&self, question: &Question) -> bool {
        let title_hit = self
            .title
            .as_deref()
            .is_some_and(|t| question.title().contains(t));
        let category_hit = self
            .category
            .as_deref()
            .is_some_and(|c| question.category().contains(c));
        title_hit || category_hit
    }
}

fn substring_pattern(value: &str) -> String {
    format!("%{value}%")
}
