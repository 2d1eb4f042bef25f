// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Behavioral consistency checks that span both policies and exercise the
// library through its public contract only. Policy-internal details (list
// fronts, p adaptation) are covered by the unit tests next to each policy.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use arclru::policy::arc::ArcCache;
use arclru::policy::lru::LruCache;
use arclru::traits::Cache;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ==============================================
// Capacity bound
// ==============================================

fn churn<C: Cache<u32, u32>>(cache: &mut C, keys: u32, ops: u32) {
    for i in 0..ops {
        cache.put(i % keys, i);
        if i % 2 == 0 {
            let _ = cache.get(&((i + 7) % keys));
        }
        assert!(cache.len() <= cache.capacity(), "capacity bound violated");
    }
}

#[test]
fn lru_len_never_exceeds_capacity() {
    let mut cache = LruCache::new(16);
    churn(&mut cache, 64, 5_000);
    cache.debug_validate_invariants();
}

#[test]
fn arc_len_never_exceeds_capacity() {
    let mut cache = ArcCache::new(16);
    churn(&mut cache, 64, 5_000);
    cache.debug_validate_invariants();
}

// ==============================================
// Reference scenarios
// ==============================================

#[test]
fn lru_eviction_scenario() {
    let evicted = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&evicted);
    let mut cache = LruCache::new(2).on_evict(move |k: &u32, v: u32| {
        log.lock().unwrap().push((*k, v));
    });

    cache.put(1, 1);
    cache.put(2, 2);
    cache.put(1, 11);
    cache.put(3, 3);

    assert_eq!(evicted.lock().unwrap().as_slice(), &[(2, 2)]);
    assert!(cache.contains(&1) && cache.contains(&3));
    assert_eq!(cache.len(), 2);

    // LRU end first; the most recent put is visited last.
    let mut order = Vec::new();
    cache.each(0, &mut |k, v| order.push((*k, *v)));
    assert_eq!(order, vec![(1, 11), (3, 3)]);
}

#[test]
fn arc_ghost_scenario_shade_sequence() {
    let shaded = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&shaded);
    let mut cache = ArcCache::new(2).on_shade(move |k: &u32, v: u32| {
        log.lock().unwrap().push((*k, v));
    });

    cache.put(1, 1);
    cache.put(2, 2);
    cache.put(1, 11); // promote 1
    cache.put(3, 3); // shade (2, 2)
    cache.put(2, 22); // B1 hit; shade (1, 11)
    cache.put(1, 111); // B2 hit; shade (3, 3)
    cache.put(4, 4); // shade (2, 22)
    cache.put(5, 5); // shade (4, 4)

    assert_eq!(
        shaded.lock().unwrap().as_slice(),
        &[(2, 2), (1, 11), (3, 3), (2, 22), (4, 4)]
    );
    assert!(cache.contains(&5) && cache.contains(&1));
    assert_eq!(cache.len(), 2);
    cache.debug_validate_invariants();
}

#[test]
fn arc_each_traverses_t1_then_t2() {
    let mut cache = ArcCache::new(8);
    for i in 0..8u32 {
        cache.put(i, i);
    }
    for i in 0..4u32 {
        cache.put(i, i); // lower half moves to the frequency side
    }

    let mut order = Vec::new();
    cache.each(0, &mut |k, _| order.push(*k));
    assert_eq!(order, vec![4, 5, 6, 7, 0, 1, 2, 3]);
}

// ==============================================
// Clear / omit semantics
// ==============================================

fn clear_is_idempotent<C: Cache<u32, u32>>(mut cache: C, evictions: &AtomicUsize) {
    for i in 0..6 {
        cache.put(i, i);
    }
    let residents = cache.len();
    let before_clear = evictions.load(Ordering::SeqCst);
    cache.clear();
    cache.clear();
    assert_eq!(
        evictions.load(Ordering::SeqCst) - before_clear,
        residents,
        "clear must fire evict once per resident, and only on the first call"
    );
    assert!(cache.is_empty());
}

#[test]
fn lru_clear_idempotent() {
    let evictions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&evictions);
    let cache = LruCache::new(4).on_evict(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    clear_is_idempotent(cache, &evictions);
}

#[test]
fn arc_clear_idempotent() {
    let evictions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&evictions);
    let cache = ArcCache::new(4).on_evict(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    clear_is_idempotent(cache, &evictions);
}

fn omit_never_admits<C: Cache<u32, u32>>(mut cache: C) {
    assert_eq!(cache.get(&42), Ok(420));
    assert!(!cache.contains(&42));
    assert_eq!(cache.peek(&42), None);
    assert_eq!(cache.len(), 0);
}

#[test]
fn lru_omit_never_admits() {
    omit_never_admits(LruCache::new(4).on_omit(|k: &u32| Some(*k * 10)));
}

#[test]
fn arc_omit_never_admits() {
    omit_never_admits(ArcCache::new(4).on_omit(|k: &u32| Some(*k * 10)));
}

// ==============================================
// Callback accounting
// ==============================================
//
// Over any finite sequence: evict count == overflow evictions + resident
// removes + residents at clear. For ARC, shade count == demotions, and a
// shaded entry must not also be counted as evicted.

#[test]
fn arc_evict_and_shade_are_disjoint() {
    let evictions = Arc::new(AtomicUsize::new(0));
    let shades = Arc::new(AtomicUsize::new(0));
    let (e, s) = (Arc::clone(&evictions), Arc::clone(&shades));
    let mut cache = ArcCache::new(4)
        .on_evict(move |_, _| {
            e.fetch_add(1, Ordering::SeqCst);
        })
        .on_shade(move |_, _| {
            s.fetch_add(1, Ordering::SeqCst);
        });

    // Pure recency scan with a full T1 and empty B1: overflow falls on the
    // evict path, never the shade path.
    for i in 0..12u32 {
        cache.put(i, i);
    }
    assert_eq!(evictions.load(Ordering::SeqCst), 8);
    assert_eq!(shades.load(Ordering::SeqCst), 0);

    // Promote the survivors; further admissions demote through shade.
    for i in 8..12u32 {
        cache.put(i, i);
    }
    cache.put(100, 100);
    assert_eq!(evictions.load(Ordering::SeqCst), 8);
    assert_eq!(shades.load(Ordering::SeqCst), 1);

    // Explicit removes of residents land on the evict side.
    cache.remove(&100);
    assert_eq!(evictions.load(Ordering::SeqCst), 9);
    cache.debug_validate_invariants();
}

// ==============================================
// Randomized operation mix
// ==============================================

#[test]
fn random_op_mix_preserves_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut lru = LruCache::new(8);
    let mut arc = ArcCache::new(8);

    for step in 0..10_000u32 {
        let key = rng.gen_range(0..32u32);
        match rng.gen_range(0..6u8) {
            0 | 1 => {
                lru.put(key, step);
                arc.put(key, step);
            },
            2 | 3 => {
                let _ = lru.get(&key);
                let _ = arc.get(&key);
            },
            4 => {
                lru.remove(&key);
                arc.remove(&key);
            },
            _ => {
                assert_eq!(lru.peek(&key).is_some(), lru.contains(&key));
                assert_eq!(arc.peek(&key).is_some(), arc.contains(&key));
            },
        }
        if step % 1000 == 999 {
            lru.clear();
            arc.clear();
        }
        lru.debug_validate_invariants();
        arc.debug_validate_invariants();
    }
}
