// 最終レポート - インデックス順に確定したOutcome列の統計

use super::types::{Outcome, RunSummary};
use chrono::{DateTime, Utc};
use std::time::Duration;

/// 確定済みの順序付きコレクションと全体所要時間
#[derive(Debug, Clone)]
pub struct RunReport {
    outcomes: Vec<Outcome>,
    total_elapsed: Duration,
    generated_at: DateTime<Utc>,
}

/// 最速と最遅の差
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationSpread {
    pub gap: Duration,
    /// 最速を基準とした差の割合（最速が0の場合はNone）
    pub percent_of_fastest: Option<f64>,
}

impl RunReport {
    pub fn new(outcomes: Vec<Outcome>, total_elapsed: Duration) -> Self {
        Self {
            outcomes,
            total_elapsed,
            generated_at: Utc::now(),
        }
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn total_elapsed(&self) -> Duration {
        self.total_elapsed
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.total() - self.success_count()
    }

    /// 成功率（%）。0件の場合は0.0
    pub fn success_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        self.success_count() as f64 / self.total() as f64 * 100.0
    }

    /// 1件あたりの平均所要時間（全体時間 / 件数）
    pub fn average_per_item(&self) -> Option<Duration> {
        if self.outcomes.is_empty() {
            return None;
        }
        Some(self.total_elapsed.div_f64(self.total() as f64))
    }

    /// 最短のOutcome（同値の場合は先に出現したもの）
    pub fn fastest(&self) -> Option<&Outcome> {
        self.outcomes.iter().fold(None, |best, candidate| match best {
            Some(current) if current.duration <= candidate.duration => Some(current),
            _ => Some(candidate),
        })
    }

    /// 最長のOutcome（同値の場合は先に出現したもの）
    pub fn slowest(&self) -> Option<&Outcome> {
        self.outcomes.iter().fold(None, |best, candidate| match best {
            Some(current) if current.duration >= candidate.duration => Some(current),
            _ => Some(candidate),
        })
    }

    pub fn spread(&self) -> Option<DurationSpread> {
        let fastest = self.fastest()?.duration;
        let slowest = self.slowest()?.duration;
        let gap = slowest.saturating_sub(fastest);

        let percent_of_fastest = if fastest.is_zero() {
            None
        } else {
            Some(gap.as_secs_f64() / fastest.as_secs_f64() * 100.0)
        };

        Some(DurationSpread {
            gap,
            percent_of_fastest,
        })
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            total_items: self.total(),
            succeeded: self.success_count(),
            failed: self.failure_count(),
            success_rate_percent: self.success_rate(),
            total_elapsed_ms: self.total_elapsed.as_secs_f64() * 1000.0,
            average_time_per_item_ms: self
                .average_per_item()
                .map(|d| d.as_secs_f64() * 1000.0)
                .unwrap_or(0.0),
        }
    }
}
