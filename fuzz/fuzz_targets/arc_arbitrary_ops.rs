#![no_main]

use arclru::policy::arc::ArcCache;
use arclru::traits::Cache;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on ArcCache
//
// A small key space drives entries through every state: cold admission
// into T1, promotion to T2, demotion to B1/B2, ghost-hit re-admission,
// and ghost truncation. ARC's list-size invariants are revalidated after
// every operation.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = usize::from(data[0] % 16) + 1;
    let mut cache: ArcCache<u8, u32> = ArcCache::new(capacity);

    let mut idx = 1;
    while idx + 1 < data.len() {
        let op = data[idx] % 8;
        let key = data[idx + 1] % 48;

        match op {
            0 | 1 | 2 => {
                cache.put(key, u32::from(key));
                // A fresh put is always resident, whatever path admitted it.
                assert!(cache.contains(&key));
            }
            3 | 4 => {
                let hit = cache.get(&key).is_ok();
                assert_eq!(hit, cache.contains(&key));
                if hit {
                    // Any hit lands the key on the frequency side.
                    assert!(cache.t2_len() > 0);
                }
            }
            5 => {
                cache.remove(&key);
                assert!(!cache.contains(&key));
            }
            6 => {
                let mut visited = 0usize;
                cache.each(0, &mut |_, _| visited += 1);
                assert_eq!(visited, cache.len());
            }
            7 => {
                cache.clear();
                assert!(cache.is_empty());
                assert_eq!(cache.p_value(), 0);
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= cache.capacity());
        assert!(cache.t1_len() + cache.b1_len() <= cache.capacity());
        assert!(
            cache.t1_len() + cache.t2_len() + cache.b1_len() + cache.b2_len()
                <= 2 * cache.capacity()
        );
        cache.debug_validate_invariants();
        idx += 2;
    }
});
