// 到着状況監視の具象実装

use crate::core::{Outcome, OutcomeObserver};
use async_trait::async_trait;
use std::time::Duration;

pub(crate) const TABLE_RULE: &str =
    "----------------------------------------------------------------------";

/// 表のヘッダー行
pub(crate) fn table_header() -> String {
    format!(
        "{:<5} {:<12} {:<8} {:<45} {}",
        "番号", "所要時間", "状態", "リクエスト先", "詳細"
    )
}

/// 表の1行（index・所要時間・状態・ペイロード・詳細）
pub(crate) fn table_row(outcome: &Outcome, detail: &str) -> String {
    format!(
        "{:<5} {:<12} {:<8} {:<45} {}",
        outcome.index,
        format_duration(outcome.duration),
        outcome.status_label(),
        outcome.payload,
        detail
    )
}

pub(crate) fn format_duration(duration: Duration) -> String {
    format!("{duration:.3?}")
}

/// 解放されたOutcomeの1行表示
pub(crate) fn released_line(outcome: &Outcome) -> String {
    match &outcome.result {
        Ok(value) => format!("✅ [{}] 順序付き結果: {value}", outcome.index),
        Err(failure) => format!("❌ [{}] エラー結果: {failure}", outcome.index),
    }
}

/// コンソール出力による到着状況の表示
#[derive(Debug, Default, Clone)]
pub struct ConsoleOutcomeObserver {
    quiet: bool,
}

impl ConsoleOutcomeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

#[async_trait]
impl OutcomeObserver for ConsoleOutcomeObserver {
    async fn report_started(&self, total: usize) {
        if !self.quiet {
            println!("🚀 並行リクエスト開始... ({total} 件)");
            println!("{}", table_header());
            println!("{TABLE_RULE}");
        }
    }

    async fn report_arrival(&self, outcome: &Outcome, _received: usize, _total: usize) {
        if !self.quiet {
            let detail = format!("{} (結果受信)", outcome.status_label());
            println!("{}", table_row(outcome, &detail));
        }
    }

    async fn report_released(&self, outcome: &Outcome) {
        if !self.quiet {
            println!("{}", released_line(outcome));
        }
    }

    async fn report_completed(&self, succeeded: usize, failed: usize) {
        if !self.quiet {
            println!("✅ 全件完了! 成功: {succeeded}, 失敗: {failed}");
        }
    }
}

/// 何もしない到着状況監視実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpOutcomeObserver;

impl NoOpOutcomeObserver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutcomeObserver for NoOpOutcomeObserver {
    async fn report_started(&self, _total: usize) {
        // 何もしない
    }

    async fn report_arrival(&self, _outcome: &Outcome, _received: usize, _total: usize) {
        // 何もしない
    }

    async fn report_released(&self, _outcome: &Outcome) {
        // 何もしない
    }

    async fn report_completed(&self, _succeeded: usize, _failed: usize) {
        // 何もしない
    }
}
