#![no_main]

use arclru::policy::lru::LruCache;
use arclru::traits::Cache;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on LruCache
//
// Keys are drawn from a small space so puts, hits, misses, and evictions
// all occur; the capacity bound and index consistency are revalidated
// after every operation.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = usize::from(data[0] % 32) + 1;
    let mut cache: LruCache<u8, u32> = LruCache::new(capacity);

    let mut idx = 1;
    while idx + 1 < data.len() {
        let op = data[idx] % 8;
        let key = data[idx + 1] % 64;

        match op {
            0 | 1 | 2 => {
                cache.put(key, u32::from(key) + 1);
                assert!(cache.contains(&key));
                assert_eq!(cache.peek(&key), Some(u32::from(key) + 1));
            }
            3 | 4 => {
                let hit = cache.get(&key).is_ok();
                assert_eq!(hit, cache.contains(&key));
            }
            5 => {
                cache.remove(&key);
                assert!(!cache.contains(&key));
            }
            6 => {
                let mut visited = 0usize;
                cache.each(usize::from(key % 8), &mut |_, _| visited += 1);
                assert!(visited <= cache.len());
            }
            7 => {
                cache.clear();
                assert!(cache.is_empty());
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= cache.capacity());
        cache.debug_validate_invariants();
        idx += 2;
    }
});
