use crate::services::FanoutSettings;
use anyhow::Result;
use std::path::Path;

/// 実効設定（既定ターゲットを展開済み）をJSON文字列で返す
pub fn execute_show_config(config: Option<&Path>) -> Result<String> {
    let mut settings = match config {
        Some(path) => FanoutSettings::load(path)?,
        None => FanoutSettings::default(),
    };
    settings.targets = settings.effective_targets();

    let json = serde_json::to_string_pretty(&settings)
        .map_err(|e| anyhow::anyhow!("JSON変換エラー: {e}"))?;
    Ok(json)
}
