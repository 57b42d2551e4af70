// JSONレポート出力

use crate::core::{Outcome, ReportSink, RunReport, RunSummary};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::info;

/// JSON形式で保存するOutcome（インデックス単位）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub index: usize,
    pub payload: String,
    pub status: String,
    pub detail: String,
    pub duration_ms: f64,
}

impl From<&Outcome> for OutcomeRecord {
    fn from(outcome: &Outcome) -> Self {
        let detail = match &outcome.result {
            Ok(value) => value.clone(),
            Err(failure) => failure.reason.clone(),
        };
        Self {
            index: outcome.index,
            payload: outcome.payload.clone(),
            status: if outcome.is_success() {
                "success".to_string()
            } else {
                "failure".to_string()
            },
            detail,
            duration_ms: outcome.duration.as_secs_f64() * 1000.0,
        }
    }
}

/// JSONレポート全体
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub generated_at: String,
    pub summary: RunSummary,
    pub fastest: Option<OutcomeRecord>,
    pub slowest: Option<OutcomeRecord>,
    pub outcomes: Vec<OutcomeRecord>,
}

impl From<&RunReport> for ReportDocument {
    fn from(report: &RunReport) -> Self {
        Self {
            generated_at: report.generated_at().to_rfc3339(),
            summary: report.summary(),
            fastest: report.fastest().map(OutcomeRecord::from),
            slowest: report.slowest().map(OutcomeRecord::from),
            outcomes: report.outcomes().iter().map(OutcomeRecord::from).collect(),
        }
    }
}

/// レポートをJSONファイルに書き出すSink
#[derive(Debug, Clone)]
pub struct JsonReportSink {
    file_path: PathBuf,
}

impl JsonReportSink {
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ReportSink for JsonReportSink {
    async fn publish(&self, report: &RunReport) -> Result<()> {
        let document = ReportDocument::from(report);
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| anyhow::anyhow!("JSON変換エラー: {e}"))?;

        // 親ディレクトリが存在しない場合は作成
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| anyhow::anyhow!("ディレクトリ作成エラー: {e}"))?;
            }
        }

        let mut file = tokio::fs::File::create(&self.file_path)
            .await
            .map_err(|e| anyhow::anyhow!("ファイル作成エラー: {e}"))?;
        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("書き込みエラー: {e}"))?;
        file.flush()
            .await
            .map_err(|e| anyhow::anyhow!("フラッシュエラー: {e}"))?;

        info!(
            path = %self.file_path.display(),
            outcomes = document.outcomes.len(),
            "JSON report written"
        );
        Ok(())
    }
}
