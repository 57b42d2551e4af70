// コンソールへの最終レポート出力

use crate::core::{ReportSink, RunReport};
use crate::services::monitoring::implementations::{
    format_duration, table_header, table_row, TABLE_RULE,
};
use anyhow::Result;
use async_trait::async_trait;

/// 最終レポートの各セクションを組み立てる
pub fn render_report(report: &RunReport) -> String {
    let mut lines = Vec::new();

    lines.push(String::new());
    lines.push("======================= 最終結果（リクエスト順） =======================".to_string());
    lines.push(table_header());
    lines.push(TABLE_RULE.to_string());
    for outcome in report.outcomes() {
        let detail = match &outcome.result {
            Ok(value) => format!("✅ {value}"),
            Err(failure) => format!("❌ {failure}"),
        };
        lines.push(table_row(outcome, &detail));
    }

    let summary = report.summary();
    lines.push(String::new());
    lines.push("======================= 実行統計 =======================".to_string());
    lines.push(format!("総リクエスト数: {}", summary.total_items));
    lines.push(format!("成功: {}", summary.succeeded));
    lines.push(format!("失敗: {}", summary.failed));
    lines.push(format!("成功率: {:.1}%", summary.success_rate_percent));
    lines.push(format!(
        "総実行時間: {} ({:.1}ms/リクエスト)",
        format_duration(report.total_elapsed()),
        summary.average_time_per_item_ms
    ));

    if let (Some(fastest), Some(slowest), Some(spread)) =
        (report.fastest(), report.slowest(), report.spread())
    {
        lines.push(String::new());
        lines.push("======================= パフォーマンス分析 =======================".to_string());
        lines.push(format!(
            "最速: #{} {} ({})",
            fastest.index,
            fastest.payload,
            format_duration(fastest.duration)
        ));
        lines.push(format!(
            "最遅: #{} {} ({})",
            slowest.index,
            slowest.payload,
            format_duration(slowest.duration)
        ));
        let percent = spread
            .percent_of_fastest
            .map(|p| format!("{p:.1}%"))
            .unwrap_or_else(|| "N/A".to_string());
        lines.push(format!("速度差: {} ({percent})", format_duration(spread.gap)));
    }

    lines.join("\n")
}

/// 標準出力に最終レポートを表示するSink
#[derive(Debug, Default, Clone)]
pub struct ConsoleReportSink;

impl ConsoleReportSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReportSink for ConsoleReportSink {
    async fn publish(&self, report: &RunReport) -> Result<()> {
        println!("{}", render_report(report));
        Ok(())
    }
}
