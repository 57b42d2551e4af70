// ディスパッチシステムのトレイト定義
// 全ての抽象化インターフェースを定義

use super::report::RunReport;
use super::types::{Outcome, WorkItem};
use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use std::time::Duration;

/// WorkItem 1件を実行する抽象化トレイト
///
/// 並行に呼び出される。論理的な失敗は `Outcome::result` で返し、
/// パニックやエラー伝播でディスパッチを止めてはならない。
#[automock]
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, item: WorkItem) -> Outcome;
}

/// ディスパッチ設定を抽象化するトレイト
#[automock]
pub trait FanoutConfig: Send + Sync {
    /// 同時実行数の上限（None は無制限）
    fn max_concurrent_tasks(&self) -> Option<usize>;

    /// 実行全体のタイムアウト
    fn timeout(&self) -> Option<Duration>;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

/// 到着順のライブ表示を抽象化するトレイト
#[automock]
#[async_trait]
pub trait OutcomeObserver: Send + Sync {
    /// ディスパッチ開始時の報告
    async fn report_started(&self, total: usize);

    /// Outcome到着時の報告（到着順、バッファリングなし）
    async fn report_arrival(&self, outcome: &Outcome, received: usize, total: usize);

    /// インデックス順に解放されたOutcomeの報告
    async fn report_released(&self, outcome: &Outcome);

    /// 全件完了時の報告
    async fn report_completed(&self, succeeded: usize, failed: usize);
}

// OutcomeObserver for Box<dyn OutcomeObserver>
#[async_trait]
impl OutcomeObserver for Box<dyn OutcomeObserver> {
    async fn report_started(&self, total: usize) {
        self.as_ref().report_started(total).await
    }

    async fn report_arrival(&self, outcome: &Outcome, received: usize, total: usize) {
        self.as_ref().report_arrival(outcome, received, total).await
    }

    async fn report_released(&self, outcome: &Outcome) {
        self.as_ref().report_released(outcome).await
    }

    async fn report_completed(&self, succeeded: usize, failed: usize) {
        self.as_ref().report_completed(succeeded, failed).await
    }
}

/// 最終レポートの出力先を抽象化するトレイト
#[automock]
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn publish(&self, report: &RunReport) -> Result<()>;
}

// ReportSink for Box<dyn ReportSink>
#[async_trait]
impl ReportSink for Box<dyn ReportSink> {
    async fn publish(&self, report: &RunReport) -> Result<()> {
        self.as_ref().publish(report).await
    }
}
