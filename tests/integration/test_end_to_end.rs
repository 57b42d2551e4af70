// エンドツーエンド統合テスト
use crate::fixtures::{payloads, RecordingObserver};
use ordered_fanout::{
    services::CompositeReportSink, DefaultFanoutConfig, FanoutEngine, JsonReportSink,
    MemoryReportSink, ScriptedExecutor, SimulatedExecutor, SimulationSettings,
    CANCELLED_REASON,
};
use serde_json::Value;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test(start_paused = true)]
async fn test_one_failure_keeps_its_index() {
    let executor = ScriptedExecutor::new()
        .succeed(0, Duration::from_millis(30), "user")
        .fail(1, Duration::from_millis(10), "connection refused")
        .succeed(2, Duration::from_millis(20), "orders");
    let sink = MemoryReportSink::new();
    let engine = FanoutEngine::new(
        executor,
        DefaultFanoutConfig::default(),
        RecordingObserver::new(),
        sink.clone(),
    );

    let report = engine.run(payloads(3)).await.unwrap();

    assert_eq!(report.total(), 3);
    assert_eq!(report.success_count(), 2);
    assert_eq!(report.failure_count(), 1);

    let failure = report.outcomes()[1].result.as_ref().unwrap_err();
    assert!(!failure.reason.is_empty());
    assert_eq!(failure.payload, "item-1");

    assert_eq!(report.fastest().unwrap().index, 1);
    assert_eq!(report.slowest().unwrap().index, 0);
    assert_eq!(sink.publish_count(), 1);
}

#[tokio::test]
async fn test_simulated_run_writes_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("report.json");

    let executor = SimulatedExecutor::new(SimulationSettings {
        max_delay_ms: 20,
        failure_rate: 0.3,
        seed: Some(11),
    })
    .unwrap();
    let memory = MemoryReportSink::new();
    let sink = CompositeReportSink::new()
        .with_sink(memory.clone())
        .with_sink(JsonReportSink::new(&output));
    let engine = FanoutEngine::new(
        executor,
        DefaultFanoutConfig::default(),
        RecordingObserver::new(),
        sink,
    );

    let report = engine.run(payloads(10)).await.unwrap();
    assert_eq!(report.total(), 10);

    let parsed: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let outcomes = parsed["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 10);
    for (position, record) in outcomes.iter().enumerate() {
        assert_eq!(record["index"], position);
        assert_eq!(record["payload"], format!("item-{position}"));
    }
    assert_eq!(
        parsed["summary"]["succeeded"],
        memory.last_report().unwrap().success_count()
    );
}

#[tokio::test]
async fn test_seeded_runs_agree_on_outcomes() {
    let settings = SimulationSettings {
        max_delay_ms: 15,
        failure_rate: 0.5,
        seed: Some(2024),
    };

    let mut statuses = Vec::new();
    for _ in 0..2 {
        let engine = FanoutEngine::new(
            SimulatedExecutor::new(settings.clone()).unwrap(),
            DefaultFanoutConfig::default(),
            RecordingObserver::new(),
            MemoryReportSink::new(),
        );
        let report = engine.run(payloads(12)).await.unwrap();
        statuses.push(
            report
                .outcomes()
                .iter()
                .map(|o| o.is_success())
                .collect::<Vec<_>>(),
        );
    }

    assert_eq!(statuses[0], statuses[1]);
}

#[tokio::test(start_paused = true)]
async fn test_bounded_run_still_completes_every_item() {
    let executor = ScriptedExecutor::new()
        .succeed(0, Duration::from_millis(10), "a")
        .succeed(1, Duration::from_millis(10), "b")
        .succeed(2, Duration::from_millis(10), "c")
        .succeed(3, Duration::from_millis(10), "d");
    let engine = FanoutEngine::new(
        executor,
        DefaultFanoutConfig::default().with_max_concurrent(1),
        RecordingObserver::new(),
        MemoryReportSink::new(),
    );

    let report = engine.run(payloads(4)).await.unwrap();

    assert_eq!(report.success_count(), 4);
    // 1件ずつ直列に実行される
    assert!(report.total_elapsed() >= Duration::from_millis(40));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_turns_outstanding_items_into_cancellations() {
    let executor = ScriptedExecutor::new()
        .succeed(0, Duration::from_millis(5), "fast")
        .succeed(1, Duration::from_secs(5), "slow")
        .succeed(2, Duration::from_secs(5), "slow");
    let engine = FanoutEngine::new(
        executor,
        DefaultFanoutConfig::default().with_timeout(Duration::from_millis(50)),
        RecordingObserver::new(),
        MemoryReportSink::new(),
    );

    let report = engine.run(payloads(3)).await.unwrap();

    assert_eq!(report.total(), 3);
    assert!(report.outcomes()[0].is_success());
    for outcome in &report.outcomes()[1..] {
        assert_eq!(outcome.result.as_ref().unwrap_err().reason, CANCELLED_REASON);
    }
    assert!(report.total_elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_engine_is_reusable_after_a_timed_out_run() {
    let executor = ScriptedExecutor::new()
        .succeed(0, Duration::from_millis(5), "fast")
        .succeed(1, Duration::from_secs(5), "slow");
    let sink = MemoryReportSink::new();
    let engine = FanoutEngine::new(
        executor,
        DefaultFanoutConfig::default().with_timeout(Duration::from_millis(50)),
        RecordingObserver::new(),
        sink.clone(),
    );

    let timed_out = engine.run(payloads(2)).await.unwrap();
    assert_eq!(timed_out.failure_count(), 1);

    let report = engine.run(payloads(1)).await.unwrap();
    assert_eq!(report.success_count(), 1);
    assert_eq!(report.outcomes()[0].result.as_deref(), Ok("fast"));
    assert_eq!(sink.publish_count(), 2);
}
