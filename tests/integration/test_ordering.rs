// 到着順と復元順の統合テスト
use crate::fixtures::{payloads, scripted_delays, ObservedEvent, RecordingObserver};
use ordered_fanout::{
    DefaultFanoutConfig, FanoutEngine, MemoryReportSink, Outcome, Reassembler, ScriptedExecutor,
    WorkItem,
};
use std::time::Duration;

fn build_engine(
    delays_ms: &[u64],
    observer: RecordingObserver,
) -> FanoutEngine<ScriptedExecutor, DefaultFanoutConfig, RecordingObserver, MemoryReportSink> {
    FanoutEngine::new(
        scripted_delays(delays_ms),
        DefaultFanoutConfig::default(),
        observer,
        MemoryReportSink::new(),
    )
}

/// 全順列を生成（Heapのアルゴリズム）
fn permutations(items: Vec<usize>) -> Vec<Vec<usize>> {
    fn generate(k: usize, items: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if k <= 1 {
            out.push(items.clone());
            return;
        }
        for i in 0..k {
            generate(k - 1, items, out);
            if k % 2 == 0 {
                items.swap(i, k - 1);
            } else {
                items.swap(0, k - 1);
            }
        }
    }

    let mut items = items;
    let mut out = Vec::new();
    let len = items.len();
    generate(len, &mut items, &mut out);
    out
}

#[tokio::test(start_paused = true)]
async fn test_three_items_arrive_as_2_0_1() {
    let observer = RecordingObserver::new();
    let engine = build_engine(&[20, 30, 10], observer.clone());

    let report = engine.run(payloads(3)).await.unwrap();

    assert_eq!(observer.arrival_order(), vec![2, 0, 1]);
    assert_eq!(observer.release_order(), vec![0, 1, 2]);
    assert_eq!(
        observer.events(),
        vec![
            ObservedEvent::Started(3),
            ObservedEvent::Arrived { index: 2, received: 1 },
            ObservedEvent::Arrived { index: 0, received: 2 },
            ObservedEvent::Released(0),
            ObservedEvent::Arrived { index: 1, received: 3 },
            ObservedEvent::Released(1),
            ObservedEvent::Released(2),
            ObservedEvent::Completed { succeeded: 3, failed: 0 },
        ]
    );

    for (position, outcome) in report.outcomes().iter().enumerate() {
        assert_eq!(outcome.index, position);
        assert_eq!(outcome.payload, format!("item-{position}"));
    }
}

#[tokio::test(start_paused = true)]
async fn test_single_item_arrival_equals_index_order() {
    let observer = RecordingObserver::new();
    let engine = build_engine(&[7], observer.clone());

    let report = engine.run(payloads(1)).await.unwrap();

    assert_eq!(observer.arrival_order(), vec![0]);
    assert_eq!(observer.release_order(), vec![0]);
    assert_eq!(report.total(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_many_items_produce_dense_ordered_collection() {
    // 逆順に完了する遅延
    let delays: Vec<u64> = (0..50).rev().map(|d| d * 3 + 1).collect();
    let observer = RecordingObserver::new();
    let engine = build_engine(&delays, observer.clone());

    let report = engine.run(payloads(50)).await.unwrap();

    assert_eq!(report.total(), 50);
    assert_eq!(observer.arrival_order(), (0..50).rev().collect::<Vec<_>>());
    assert_eq!(observer.release_order(), (0..50).collect::<Vec<_>>());
    for (position, outcome) in report.outcomes().iter().enumerate() {
        assert_eq!(outcome.index, position);
    }
}

#[tokio::test]
async fn test_zero_items_report_is_empty() {
    let observer = RecordingObserver::new();
    let engine = build_engine(&[], observer.clone());

    let report = engine.run(Vec::<String>::new()).await.unwrap();

    assert_eq!(report.total(), 0);
    assert_eq!(report.success_rate(), 0.0);
    assert!(report.average_per_item().is_none());
    assert_eq!(
        observer.events(),
        vec![
            ObservedEvent::Started(0),
            ObservedEvent::Completed { succeeded: 0, failed: 0 },
        ]
    );
    assert!(engine.sink().last_report().is_some());
}

#[test]
fn test_reassembly_is_independent_of_arrival_permutation() {
    let outcomes: Vec<Outcome> = (0..5)
        .map(|index| {
            let item = WorkItem::new(index, format!("item-{index}"));
            if index == 3 {
                Outcome::failure(&item, "refused", Duration::from_millis(index as u64))
            } else {
                Outcome::success(&item, format!("v{index}"), Duration::from_millis(index as u64))
            }
        })
        .collect();

    let expected = outcomes.clone();
    let orders = permutations((0..5).collect());
    assert_eq!(orders.len(), 120);

    for order in orders {
        let mut reassembler = Reassembler::new(5);
        for index in &order {
            reassembler.accept(outcomes[*index].clone()).unwrap();
        }
        assert_eq!(reassembler.finish().unwrap(), expected, "arrival order {order:?}");
    }
}
