// 複数Sinkへの順次出力

use crate::core::{ReportSink, RunReport};
use anyhow::Result;
use async_trait::async_trait;

/// 登録順に各Sinkへレポートを渡す。最初の失敗で中断する
#[derive(Default)]
pub struct CompositeReportSink {
    sinks: Vec<Box<dyn ReportSink>>,
}

impl CompositeReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink<S>(mut self, sink: S) -> Self
    where
        S: ReportSink + 'static,
    {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl ReportSink for CompositeReportSink {
    async fn publish(&self, report: &RunReport) -> Result<()> {
        for sink in &self.sinks {
            sink.publish(report).await?;
        }
        Ok(())
    }
}
