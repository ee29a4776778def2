//! # インフラ層エラー定義
//!
//! [`InfraError`] はエラーの分類（[`InfraErrorKind`]）と、生成時点の [`SpanTrace`] を持つ。
//! `From<sqlx::Error>` で変換した時点のスパン（どのリポジトリメソッドで失敗したか）が
//! 記録されるので、API 層はこれをログに出すだけでよい。クライアントには何も漏らさない。
//!
//! sqlx のエラーは 2 つに振り分ける:
//!
//! | 分類 | 対象 |
//! |------|------|
//! | [`InfraErrorKind::Connection`] | プールのタイムアウト・クローズ、I/O、TLS |
//! | [`InfraErrorKind::Query`] | 上記以外（SQL エラー、制約違反、デコード失敗など） |

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
#[derive(Debug, Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// データベースに到達できない
    #[error("データベースに接続できません: {0}")]
    Connection(#[source] sqlx::Error),

    /// 文の実行に失敗した
    #[error("クエリの実行に失敗しました: {0}")]
    Query(#[source] sqlx::Error),

    /// PostgreSQL のコネクションを持たないトランザクションから接続を取り出そうとした
    #[error("トランザクションにデータベース接続がありません")]
    NoConnection,
}

impl InfraError {
    fn new(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    pub(crate) fn no_connection() -> Self {
        Self::new(InfraErrorKind::NoConnection)
    }

    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// 生成時点のスパン
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// データベースに到達できなかったエラーか
    pub fn is_connection(&self) -> bool {
        matches!(self.kind, InfraErrorKind::Connection(_))
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(error: sqlx::Error) -> Self {
        let kind = match error {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => InfraErrorKind::Connection(error),
            other => InfraErrorKind::Query(other),
        };
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    #[test]
    fn test_変換時のスパンがspan_traceに残る() {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        let span = tracing::info_span!("lock_by_id", id = 42);
        let _enter = span.enter();

        let err: InfraError = sqlx::Error::RowNotFound.into();

        let trace = err.span_trace().to_string();
        assert!(trace.contains("lock_by_id"), "スパン名を含むこと: {trace}");
    }

    #[rstest]
    #[case::プールのタイムアウト(sqlx::Error::PoolTimedOut, true)]
    #[case::プールのクローズ(sqlx::Error::PoolClosed, true)]
    #[case::行なし(sqlx::Error::RowNotFound, false)]
    #[case::列なし(sqlx::Error::ColumnNotFound("upvotes".to_string()), false)]
    fn test_sqlxのエラーを接続とクエリに振り分ける(
        #[case] source: sqlx::Error,
        #[case] connection: bool,
    ) {
        let err = InfraError::from(source);

        assert_eq!(err.is_connection(), connection);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_no_connectionは原因を持たない() {
        let err = InfraError::no_connection();

        assert!(matches!(err.kind(), InfraErrorKind::NoConnection));
        assert!(err.source().is_none());
        assert_eq!(
            err.to_string(),
            "トランザクションにデータベース接続がありません"
        );
    }
}
