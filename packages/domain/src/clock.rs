//! # Clock（時刻プロバイダ）
//!
//! 質問の `created_at` / `updated_at` を打刻する時刻源。
//! ユースケースは `Utc::now()` を直接呼ばず、注入された [`Clock`] から時刻を得る。

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// 実際のシステム時刻を返す実装
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 手動で進めるテスト用実装
///
/// 作成と更新で異なる時刻を打刻させたいテストのために [`advance`](ManualClock::advance)
/// を持つ。
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// 時刻を `duration` だけ進める
    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += duration;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_system_clock_は現在時刻を返す() {
        let before = Utc::now();
        let result = SystemClock.now();
        let after = Utc::now();

        assert!(before <= result && result <= after);
    }

    #[test]
    fn test_manual_clock_は進めるまで同じ時刻を返す() {
        let clock = ManualClock::new(fixed_now());

        assert_eq!(clock.now(), fixed_now());
        assert_eq!(clock.now(), fixed_now());
    }

    #[test]
    fn test_manual_clock_はadvanceした分だけ進む() {
        let clock = ManualClock::new(fixed_now());

        clock.advance(Duration::minutes(5));

        assert_eq!(clock.now(), fixed_now() + Duration::minutes(5));
    }
}
