// ディスパッチに関連するデータ型定義

use super::error::ExecutionFailure;
use std::time::Duration;

/// 1単位の作業記述（生成後は不変）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItem {
    index: usize,
    payload: String,
}

impl WorkItem {
    pub fn new(index: usize, payload: impl Into<String>) -> Self {
        Self {
            index,
            payload: payload.into(),
        }
    }

    /// ペイロード列から 0..N-1 の連番付きWorkItemを作成
    pub fn batch<I, S>(payloads: I) -> Vec<WorkItem>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        payloads
            .into_iter()
            .enumerate()
            .map(|(index, payload)| WorkItem::new(index, payload))
            .collect()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }
}

/// WorkItem 1件の実行結果
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub index: usize,
    pub payload: String,
    pub result: Result<String, ExecutionFailure>,
    pub duration: Duration,
}

impl Outcome {
    pub fn success(item: &WorkItem, value: impl Into<String>, duration: Duration) -> Self {
        Self {
            index: item.index(),
            payload: item.payload().to_string(),
            result: Ok(value.into()),
            duration,
        }
    }

    pub fn failure(item: &WorkItem, reason: impl Into<String>, duration: Duration) -> Self {
        Self {
            index: item.index(),
            payload: item.payload().to_string(),
            result: Err(ExecutionFailure::new(item.payload(), reason)),
            duration,
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// 状態ラベル（表示用）
    pub fn status_label(&self) -> &'static str {
        if self.is_success() {
            "成功"
        } else {
            "失敗"
        }
    }

    /// 成功値または失敗理由
    pub fn detail(&self) -> String {
        match &self.result {
            Ok(value) => value.clone(),
            Err(failure) => failure.to_string(),
        }
    }
}

/// 実行全体のサマリー
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RunSummary {
    pub total_items: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub success_rate_percent: f64,
    pub total_elapsed_ms: f64,
    pub average_time_per_item_ms: f64,
}
