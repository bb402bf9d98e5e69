use ember_core::{
    AnchorDraft, AnchorError, AnchorPatch, AnchorService, EntityKind, MemoryAdapter,
    MemoryService, SqliteAdapter, StorageAdapter,
};
use serde_json::json;
use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use uuid::Uuid;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn as_set(values: &[String]) -> HashSet<String> {
    values.iter().cloned().collect()
}

#[test]
fn merge_while_absent_is_anchor_not_found() {
    let service = MemoryService::in_memory(Duration::from_secs(1));

    assert!(service.anchor().unwrap().is_none());
    let err = service.merge_anchor(&AnchorPatch::default()).unwrap_err();
    assert!(matches!(err, AnchorError::AnchorNotFound));
}

#[test]
fn merge_unions_without_duplicates_and_keeps_identity() {
    let service = MemoryService::in_memory(Duration::from_secs(1));
    let created = service
        .create_or_replace_anchor(AnchorDraft {
            name: "Liz".to_string(),
            truths: strings(&["a"]),
            ..AnchorDraft::default()
        })
        .unwrap();

    let merged = service
        .merge_anchor(&AnchorPatch {
            truths: Some(strings(&["a", "b"])),
            must_never_forget: Some(strings(&["the river"])),
            ..AnchorPatch::default()
        })
        .unwrap();

    assert_eq!(
        as_set(&merged.truths),
        HashSet::from(["a".to_string(), "b".to_string()])
    );
    assert_eq!(merged.truths.len(), 2);
    assert_eq!(merged.must_never_forget, strings(&["the river"]));
    assert!(merged.symbols.is_empty());
    assert_eq!(merged.id, created.id);
    assert_eq!(merged.timestamp, created.timestamp);

    let stored = service.anchor().unwrap().unwrap();
    assert_eq!(stored, merged);
}

#[test]
fn create_or_replace_keeps_a_single_anchor() {
    let service = MemoryService::in_memory(Duration::from_secs(1));
    let first = service
        .create_or_replace_anchor(AnchorDraft {
            name: "first".to_string(),
            ..AnchorDraft::default()
        })
        .unwrap();
    let second = service
        .create_or_replace_anchor(AnchorDraft {
            name: "second".to_string(),
            ..AnchorDraft::default()
        })
        .unwrap();

    assert_ne!(first.id, second.id);
    let current = service.anchor().unwrap().unwrap();
    assert_eq!(current.name, "second");
}

#[test]
fn create_or_replace_collapses_legacy_duplicates() {
    let adapter = Arc::new(MemoryAdapter::new(Duration::from_secs(1)));
    for name in ["legacy-1", "legacy-2"] {
        let id = Uuid::new_v4().to_string();
        let record = json!({
            "id": id,
            "timestamp": "2024-01-01T00:00:00Z",
            "name": name,
        });
        adapter
            .insert(EntityKind::Anchor, &id, record.as_object().cloned().unwrap())
            .unwrap();
    }
    assert_eq!(adapter.select_all(EntityKind::Anchor).unwrap().len(), 2);

    let anchors = AnchorService::new(adapter.clone());
    anchors
        .create_or_replace(AnchorDraft {
            name: "fresh".to_string(),
            ..AnchorDraft::default()
        })
        .unwrap();

    let rows = adapter.select_all(EntityKind::Anchor).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], json!("fresh"));
}

#[test]
fn concurrent_create_or_replace_never_leaves_two_anchors() {
    let adapter = Arc::new(MemoryAdapter::new(Duration::from_secs(5)));
    let service = Arc::new(MemoryService::new(adapter.clone()));

    let handles: Vec<_> = (0..8)
        .map(|index| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                service
                    .create_or_replace_anchor(AnchorDraft {
                        name: format!("writer {index}"),
                        ..AnchorDraft::default()
                    })
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(adapter.select_all(EntityKind::Anchor).unwrap().len(), 1);
}

/// Each thread owns its service; only the adapter is shared.
fn race_independent_services(adapter: Arc<dyn StorageAdapter>, writers: usize, rounds: usize) {
    for round in 0..rounds {
        let barrier = Arc::new(Barrier::new(writers));
        let handles: Vec<_> = (0..writers)
            .map(|index| {
                let adapter = Arc::clone(&adapter);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    let anchors = AnchorService::new(adapter);
                    barrier.wait();
                    anchors
                        .create_or_replace(AnchorDraft {
                            name: format!("round {round} writer {index}"),
                            ..AnchorDraft::default()
                        })
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(
            adapter.select_all(EntityKind::Anchor).unwrap().len(),
            1,
            "round {round} left more than one anchor"
        );
    }
}

#[test]
fn separate_services_on_one_memory_adapter_keep_a_single_anchor() {
    let adapter = Arc::new(MemoryAdapter::new(Duration::from_secs(5)));
    race_independent_services(adapter, 4, 200);
}

#[test]
fn separate_services_on_one_sqlite_adapter_keep_a_single_anchor() {
    let adapter = Arc::new(SqliteAdapter::open_in_memory(Duration::from_secs(5)).unwrap());
    race_independent_services(adapter, 4, 50);
}

#[test]
fn concurrent_merges_from_separate_services_lose_no_values() {
    let adapter: Arc<dyn StorageAdapter> = Arc::new(MemoryAdapter::new(Duration::from_secs(5)));
    AnchorService::new(Arc::clone(&adapter))
        .create_or_replace(AnchorDraft::default())
        .unwrap();

    let writers = 8;
    let barrier = Arc::new(Barrier::new(writers));
    let handles: Vec<_> = (0..writers)
        .map(|index| {
            let adapter = Arc::clone(&adapter);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let anchors = AnchorService::new(adapter);
                barrier.wait();
                anchors
                    .merge_update(&AnchorPatch {
                        truths: Some(vec![format!("truth {index}")]),
                        ..AnchorPatch::default()
                    })
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let anchor = AnchorService::new(adapter).get().unwrap().unwrap();
    assert_eq!(anchor.truths.len(), writers);
}
