use super::{PeriodicStore, QuotaRecord, Store, UnboundedStore};
use std::time::{Duration, SystemTime};

fn record(attempts: u32, last_refill: SystemTime) -> QuotaRecord {
    QuotaRecord {
        attempts_remaining: attempts,
        last_refill,
    }
}

#[test]
fn test_unbounded_store_keeps_everything() {
    let mut store = UnboundedStore::new();
    let now = SystemTime::now();

    for i in 0..100 {
        store.set(&format!("key:{i}"), record(1, now), Duration::from_secs(1), now);
    }

    // ttl is advisory; nothing is ever dropped
    let later = now + Duration::from_secs(3600);
    assert_eq!(store.len(), 100);
    assert!(store.get("key:0", later).is_some());
}

#[test]
fn test_periodic_store_get_ignores_lapsed_records() {
    let mut store = PeriodicStore::new();
    let now = SystemTime::now();

    store.set("lapsed", record(0, now), Duration::from_secs(30), now);

    assert!(store.get("lapsed", now + Duration::from_secs(29)).is_some());
    // Past its ttl the record reads as absent even before any sweep ran
    assert!(store.get("lapsed", now + Duration::from_secs(31)).is_none());
}

#[test]
fn test_periodic_store_sweeps_on_interval() {
    let mut store = PeriodicStore::builder()
        .capacity(16)
        .sweep_interval(Duration::from_secs(60))
        .build();
    let now = SystemTime::now();

    store.set("short", record(0, now), Duration::from_secs(30), now);
    store.set("long", record(0, now), Duration::from_secs(3600), now);
    assert_eq!(store.len(), 2);

    // A write after the sweep interval drops the lapsed record
    let later = now + Duration::from_secs(61);
    store.set("other", record(1, later), Duration::from_secs(30), later);

    assert_eq!(store.len(), 2);
    assert_eq!(store.swept_count(), 1);
    assert!(store.get("long", later).is_some());
    assert!(store.get("short", later).is_none());
}

#[test]
fn test_periodic_store_does_not_sweep_early() {
    let mut store = PeriodicStore::builder()
        .sweep_interval(Duration::from_secs(3600))
        .build();
    let now = SystemTime::now();

    store.set("a", record(0, now), Duration::from_secs(1), now);

    // Well past the ttl but before the sweep interval: entry still held
    let later = now + Duration::from_secs(60);
    store.set("b", record(1, later), Duration::from_secs(60), later);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_overwrite_replaces_record() {
    let mut store = PeriodicStore::new();
    let now = SystemTime::now();

    store.set("key", record(3, now), Duration::from_secs(60), now);
    store.set("key", record(2, now), Duration::from_secs(60), now);

    let got = store.get("key", now).unwrap();
    assert_eq!(got.attempts_remaining, 2);
    assert_eq!(store.len(), 1);
}
