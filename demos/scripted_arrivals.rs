// 台本どおりの到着順で、ライブ表示とインデックス順の復元を確認するデモ
//
// 実行: cargo run --example scripted_arrivals

use ordered_fanout::{
    ConsoleOutcomeObserver, ConsoleReportSink, DefaultFanoutConfig, FanoutEngine,
    ScriptedExecutor,
};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("=== 到着順と復元順のデモ ===\n");

    // index 2 → 0 → 3 → 1 の順に完了する
    let executor = ScriptedExecutor::new()
        .succeed(0, Duration::from_millis(200), "ユーザー情報")
        .fail(1, Duration::from_millis(400), "接続拒否")
        .succeed(2, Duration::from_millis(100), "商品一覧")
        .succeed(3, Duration::from_millis(300), "注文履歴");

    let engine = FanoutEngine::new(
        executor,
        DefaultFanoutConfig::default(),
        ConsoleOutcomeObserver::new(),
        ConsoleReportSink::new(),
    );

    let report = engine
        .run([
            "https://api.service.com/user",
            "https://api.service.com/products",
            "https://api.service.com/orders",
            "https://api.service.com/inventory",
        ])
        .await?;

    println!(
        "\n成功 {} 件 / 失敗 {} 件",
        report.success_count(),
        report.failure_count()
    );
    Ok(())
}
