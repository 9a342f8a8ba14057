use std::sync::Arc;
use std::thread;

use weightlru::{Cache, Error};

#[test]
fn test_scenario_insert_overflow() {
    let cache = Cache::new(5, 1).unwrap();
    for i in 1..=5 {
        cache.insert(format!("k{}", i), i).unwrap();
    }
    assert_eq!(cache.current_size(), 5);

    cache.insert("k6".to_string(), 6).unwrap();

    assert!(!cache.contains("k1"));
    assert_eq!(cache.discarded_count(), 1);
    assert_eq!(cache.current_size(), 5);
}

#[test]
fn test_scenario_resize() {
    let cache = Cache::with_max_size(5).unwrap();
    for i in 1..=5 {
        cache.insert(format!("k{}", i), i).unwrap();
    }

    cache.resize(3).unwrap();

    assert!(!cache.contains("k1"));
    assert!(!cache.contains("k2"));
    for key in ["k3", "k4", "k5"] {
        assert!(cache.contains(key));
    }
}

#[test]
fn test_scenario_get_and_set() {
    let cache: Cache<String, String> = Cache::with_max_size(1).unwrap();
    assert_eq!(cache.get("k1"), None);
    assert_eq!(cache.miss_count(), 1);
    assert_eq!(cache.hit_count(), 0);

    cache.insert("k1".to_string(), "v1".to_string()).unwrap();
    assert_eq!(cache.get("k1").as_deref(), Some("v1"));
    assert_eq!(cache.hit_count(), 1);

    cache.set("k1", "v2".to_string()).unwrap();
    assert_eq!(cache.get("k1").as_deref(), Some("v2"));
}

#[test]
fn test_invalid_capacities() {
    for (max, weight) in [(0, 0), (0, 1), (1, 2), (9, 10)] {
        assert_eq!(
            Cache::<u32, u32>::new(max, weight).unwrap_err(),
            Error::InvalidCapacity {
                max_size: max,
                item_weight: weight
            }
        );
    }
}

#[test]
fn test_concurrent_access() {
    let cache = Arc::new(Cache::new(64, 2).unwrap());
    let mut handles = vec![];

    for t in 0..8u64 {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            let mut removed = 0u64;
            for i in 0..500u64 {
                let key = t * 1000 + i;
                cache.insert(key, i).unwrap();
                cache.get(&key);
                cache.get(&(key + 1_000_000));
                if i % 7 == 0 && cache.remove(&key) {
                    removed += 1;
                }
            }
            removed
        }));
    }

    let removed: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();

    assert!(cache.current_size() <= cache.max_size());
    assert_eq!(cache.current_size(), cache.len() * 2);
    assert_eq!(cache.hit_count() + cache.miss_count(), 8 * 500 * 2);
    assert!(cache.miss_count() >= 8 * 500);

    // Every entry either survived, was removed, or was discarded
    assert_eq!(
        cache.len() as u64 + removed + cache.discarded_count(),
        8 * 500
    );
}
