// Custom error types for fan-out dispatch
// 実行失敗（Outcomeの値）と基盤エラー（パイプラインの失敗）を分離して定義

use thiserror::Error;

/// 単一WorkItemの実行失敗
///
/// Outcome の `result` に格納される値であり、ディスパッチ全体を中断しない。
#[derive(Error, Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[error("実行失敗 [{payload}]: {reason}")]
pub struct ExecutionFailure {
    pub payload: String,
    pub reason: String,
}

impl ExecutionFailure {
    pub fn new(payload: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            reason: reason.into(),
        }
    }
}

/// ディスパッチ基盤のエラー型
#[derive(Error, Debug)]
pub enum FanoutError {
    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("バリデーションエラー: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    #[error("インデックス範囲外: {index} (総数: {total})")]
    IndexOutOfRange { index: usize, total: usize },

    #[error("重複したOutcome: インデックス {index}")]
    DuplicateOutcome { index: usize },

    #[error("再構成未完了: {released}/{total} 件解放済み, {pending} 件保留中")]
    ReassemblyIncomplete {
        released: usize,
        total: usize,
        pending: usize,
    },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("レポート出力エラー: {source}")]
    ReportError {
        #[source]
        source: anyhow::Error,
    },
}

impl FanoutError {
    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// バリデーションエラーの作成
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// レポート出力エラーの作成
    pub fn report(source: anyhow::Error) -> Self {
        Self::ReportError { source }
    }

    /// 再構成の不変条件違反かどうか
    pub fn is_reassembly_violation(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. }
                | Self::DuplicateOutcome { .. }
                | Self::ReassemblyIncomplete { .. }
        )
    }
}

impl From<tokio::task::JoinError> for FanoutError {
    fn from(error: tokio::task::JoinError) -> Self {
        FanoutError::TaskError { source: error }
    }
}

/// ディスパッチ処理の結果型
pub type FanoutResult<T> = std::result::Result<T, FanoutError>;
