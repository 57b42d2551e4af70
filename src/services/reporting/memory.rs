// メモリ内レポート保持（テスト用）

use crate::core::{ReportSink, RunReport};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// 最後に受け取ったレポートを保持するSink
#[derive(Debug, Default, Clone)]
pub struct MemoryReportSink {
    last: Arc<Mutex<Option<RunReport>>>,
    published: Arc<Mutex<usize>>,
}

impl MemoryReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_report(&self) -> Option<RunReport> {
        self.last.lock().unwrap().clone()
    }

    pub fn publish_count(&self) -> usize {
        *self.published.lock().unwrap()
    }

    pub fn clear(&self) {
        *self.last.lock().unwrap() = None;
        *self.published.lock().unwrap() = 0;
    }
}

#[async_trait]
impl ReportSink for MemoryReportSink {
    async fn publish(&self, report: &RunReport) -> Result<()> {
        *self.last.lock().unwrap() = Some(report.clone());
        *self.published.lock().unwrap() += 1;
        Ok(())
    }
}
