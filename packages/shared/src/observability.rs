//! # Observability 基盤
//!
//! ログ出力の初期化と、HTTP リクエスト単位のスパン・Request ID を提供する。
//!
//! - [`LogFormat`] / [`TracingConfig`]: 環境変数 `LOG_FORMAT` と `RUST_LOG` から組み立てる
//! - [`init_tracing`]: fmt レイヤーに加え `tracing_error::ErrorLayer` を登録する。
//!   これがないと `InfraError` の `SpanTrace` が空になる
//! - [`MakeRequestUuidV7`] / [`make_request_span`]: tower-http のレイヤーに渡す
//!
//! tower-http / tracing-subscriber に依存する部分は `observability` feature の裏に置く。

use std::str::FromStr;

/// Request ID を運ぶ HTTP ヘッダー名
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// `RUST_LOG` が未設定のときのフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info,toiboard=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 イベントの JSON（本番環境向け）
    Json,
    /// 人間が読みやすい形式
    #[default]
    Pretty,
}

/// `LOG_FORMAT` として解釈できない値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLogFormat(pub String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    /// 大文字小文字と前後の空白は無視する
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(UnknownLogFormat(s.to_string())),
        }
    }
}

impl LogFormat {
    /// `LOG_FORMAT` の値（未設定は `None`）から決める
    ///
    /// 解釈できない値は Pretty にフォールバックし、stderr に警告を出す
    /// （この時点ではまだ subscriber がない）。
    pub fn resolve(value: Option<&str>) -> Self {
        match value.map(str::parse::<Self>) {
            None => Self::default(),
            Some(Ok(format)) => format,
            Some(Err(UnknownLogFormat(raw))) => {
                eprintln!("WARNING: unknown LOG_FORMAT={raw:?}, falling back to pretty");
                Self::default()
            }
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// 起動ログに出すサービス名
    pub service_name:   String,
    pub log_format:     LogFormat,
    /// `RUST_LOG` がないときの EnvFilter 指定
    pub default_filter: String,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
            default_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    /// `LOG_FORMAT` から設定を作る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        let log_format = LogFormat::resolve(std::env::var("LOG_FORMAT").ok().as_deref());
        Self::new(service_name, log_format)
    }
}

/// グローバル subscriber を登録する
///
/// プロセスで一度だけ呼ぶ。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.default_filter));

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();

    tracing::debug!(
        service = %config.service_name,
        log_format = ?config.log_format,
        "トレーシングを初期化しました"
    );
}

/// UUID v7 の Request ID を生成する
///
/// クライアントが `x-request-id` を送ってきた場合、`SetRequestIdLayer` はそちらを使い
/// これを呼ばない。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(
        &mut self,
        _request: &http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        http::HeaderValue::try_from(uuid::Uuid::now_v7().to_string())
            .ok()
            .map(tower_http::request_id::RequestId::new)
    }
}

/// `TraceLayer::make_span_with` に渡すリクエストスパン
///
/// `SetRequestIdLayer` の内側で呼ばれるので Request ID は設定済み。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_log_format_大文字小文字を区別せずに解釈する() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!(" JSON ".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("Pretty".parse::<LogFormat>(), Ok(LogFormat::Pretty));
    }

    #[test]
    fn test_log_format_未知の値はエラー() {
        assert_eq!(
            "yaml".parse::<LogFormat>(),
            Err(UnknownLogFormat("yaml".to_string()))
        );
    }

    #[test]
    fn test_resolve_未設定と不正な値はprettyになる() {
        assert_eq!(LogFormat::resolve(None), LogFormat::Pretty);
        assert_eq!(LogFormat::resolve(Some("")), LogFormat::Pretty);
        assert_eq!(LogFormat::resolve(Some("yaml")), LogFormat::Pretty);
        assert_eq!(LogFormat::resolve(Some("json")), LogFormat::Json);
    }

    #[test]
    fn test_tracing_config_既定のフィルタを持つ() {
        let config = TracingConfig::new("toiboard-api", LogFormat::Json);

        assert_eq!(config.service_name, "toiboard-api");
        assert_eq!(config.default_filter, "info,toiboard=debug");
    }
}
