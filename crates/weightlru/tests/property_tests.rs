use std::collections::VecDeque;

use proptest::prelude::*;
use weightlru::{Cache, Error};

#[derive(Debug, Clone)]
enum Op {
    Insert(u8),
    Get(u8),
    Set(u8),
    Remove(u8),
    Resize(usize),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..16).prop_map(Op::Insert),
        3 => (0u8..16).prop_map(Op::Get),
        1 => (0u8..16).prop_map(Op::Set),
        1 => (0u8..16).prop_map(Op::Remove),
        1 => (0usize..12).prop_map(Op::Resize),
        1 => Just(Op::Clear),
    ]
}

/// Reference model: keys ordered from least to most recently used
struct Model {
    order: VecDeque<u8>,
    max_size: usize,
    weight: usize,
    discarded: u64,
}

impl Model {
    fn touch(&mut self, key: u8) -> bool {
        match self.order.iter().position(|k| *k == key) {
            Some(pos) => {
                self.order.remove(pos);
                self.order.push_back(key);
                true
            }
            None => false,
        }
    }

    fn trim(&mut self) {
        while self.order.len() * self.weight > self.max_size {
            self.order.pop_front();
            self.discarded += 1;
        }
    }
}

proptest! {
    #[test]
    fn test_matches_reference_model(
        max_size in 1usize..10,
        weight in 0usize..4,
        ops in prop::collection::vec(op_strategy(), 1..80),
    ) {
        prop_assume!(weight <= max_size);

        let cache: Cache<u8, u32> = Cache::new(max_size, weight).unwrap();
        let mut model = Model { order: VecDeque::new(), max_size, weight, discarded: 0 };

        for op in ops {
            match op {
                Op::Insert(k) => {
                    let res = cache.insert(k, k as u32);
                    if model.order.contains(&k) {
                        prop_assert_eq!(res, Err(Error::DuplicateKey));
                    } else {
                        prop_assert!(res.is_ok());
                        model.order.push_back(k);
                        model.trim();
                    }
                }
                Op::Get(k) => {
                    let hit = model.touch(k);
                    prop_assert_eq!(cache.get(&k).is_some(), hit);
                }
                Op::Set(k) => {
                    let hit = model.touch(k);
                    let res = cache.set(&k, k as u32 + 100);
                    prop_assert_eq!(res.is_ok(), hit);
                }
                Op::Remove(k) => {
                    let present = model.order.contains(&k);
                    prop_assert_eq!(cache.remove(&k), present);
                    model.order.retain(|x| *x != k);
                }
                Op::Resize(n) => {
                    let res = cache.resize(n);
                    if n == 0 || n < weight {
                        prop_assert!(res.is_err());
                    } else {
                        prop_assert!(res.is_ok());
                        model.max_size = n;
                        model.trim();
                    }
                }
                Op::Clear => {
                    cache.clear();
                    model.order.clear();
                }
            }

            // Index and recency order hold the same keys
            let mut keys = cache.keys();
            keys.sort_unstable();
            let mut expected: Vec<u8> = model.order.iter().copied().collect();
            expected.sort_unstable();
            prop_assert_eq!(keys, expected);

            prop_assert_eq!(cache.current_size(), cache.len() * weight);
            prop_assert!(cache.current_size() <= cache.max_size());
            prop_assert_eq!(cache.oldest_key(), model.order.front().copied());
            prop_assert_eq!(cache.newest_key(), model.order.back().copied());
            prop_assert_eq!(cache.discarded_count(), model.discarded);
        }
    }

    #[test]
    fn test_eviction_keeps_most_recent(count in 1usize..60, max_size in 1usize..20) {
        let cache: Cache<usize, usize> = Cache::with_max_size(max_size).unwrap();

        for i in 0..count {
            cache.insert(i, i).unwrap();
        }

        let kept = count.min(max_size);
        let mut keys = cache.keys();
        keys.sort_unstable();
        prop_assert_eq!(keys, ((count - kept)..count).collect::<Vec<_>>());
        prop_assert_eq!(cache.discarded_count(), (count - kept) as u64);
    }
}
