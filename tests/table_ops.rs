// End-to-end point-operation and concurrency coverage for shared table handles.
use std::thread;

use ordtable::core::access::{Access, Update};
use ordtable::core::error::ErrorKind;
use ordtable::core::render::render;
use ordtable::core::table::Table;
use ordtable::core::traverse::Enumerate;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

#[test]
fn insert_snapshot_and_membership_round_trip() {
    let table = Table::new();
    table.insert("a", 1);
    table.insert("b", 2);

    assert_eq!(table.len(), 2);
    assert_eq!(table.snapshot(), vec![("a", 1), ("b", 2)]);
    assert!(table.contains(&"a"));
    assert!(!table.contains(&"c"));
    assert_eq!(render(&table), "[(a, 1), (b, 2)]");
}

#[test]
fn fetch_after_delete_reports_not_found() {
    let table = Table::new();
    table.insert("a", 1);
    assert_eq!(table.remove(&"a"), Some(1));
    assert_eq!(table.fetch(&"a").expect_err("gone").kind(), ErrorKind::NotFound);
    assert_eq!(table.remove(&"a"), None);
}

#[test]
fn handles_share_writes_and_survive_partial_drops() {
    let table = Table::new();
    let writer = table.clone();
    let reader = table.clone();
    writer.insert("a", 1);
    drop(writer);
    drop(table);
    assert_eq!(reader.get(&"a"), Some(1));
}

#[test]
fn concurrent_single_key_updates_are_serialized() {
    init_logging();
    let table = Table::new();
    table.insert("counter", 0u64);

    let threads = 8u64;
    let rounds = 1000u64;
    let mut workers = Vec::new();
    for _ in 0..threads {
        let handle = table.clone();
        workers.push(thread::spawn(move || {
            for _ in 0..rounds {
                handle
                    .get_and_update("counter", |current| {
                        let current = current.copied().unwrap_or(0);
                        Update::Set {
                            get: Some(current),
                            value: current + 1,
                        }
                    })
                    .expect("update");
            }
        }));
    }
    for worker in workers {
        worker.join().expect("join");
    }

    assert_eq!(table.get(&"counter"), Some(threads * rounds));
}

#[test]
fn concurrent_inserts_from_many_handles_all_land() {
    init_logging();
    let table = Table::new();

    let threads = 4u64;
    let per_thread = 250u64;
    let mut workers = Vec::new();
    for t in 0..threads {
        let handle = table.clone();
        workers.push(thread::spawn(move || {
            for i in 0..per_thread {
                handle.insert(t * per_thread + i, t);
            }
        }));
    }
    for worker in workers {
        worker.join().expect("join");
    }

    assert_eq!(table.len() as u64, threads * per_thread);
    assert_eq!(table.first_key(), Some(0));
    let keys = table.keys();
    assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn bulk_construction_applies_pairs_in_input_order() {
    let table: Table<&str, i32> = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
    assert_eq!(table.snapshot(), vec![("a", 3), ("b", 2)]);

    let mut table = table;
    table.extend([("c", 4)]);
    assert_eq!(table.count(), 3);
}
