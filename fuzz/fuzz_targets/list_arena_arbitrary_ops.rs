#![no_main]

use arclru::ds::{ListArena, ListTag};
use libfuzzer_sys::fuzz_target;

const TAGS: [ListTag; 3] = [ListTag::new(0), ListTag::new(1), ListTag::new(2)];

// Fuzz arbitrary operation sequences on ListArena
//
// Random sequences of push_front, move_to_front (cross-list), detach,
// remove, pop_back, traversal, and clear, validating structure after
// every step.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut arena: ListArena<u32> = ListArena::new(TAGS.len());
    let mut all_ids = Vec::new();

    let mut idx = 0;
    while idx + 2 < data.len() {
        let op = data[idx] % 8;
        let tag = TAGS[(data[idx + 1] as usize) % TAGS.len()];
        let value = u32::from(data[idx + 2]);

        match op {
            0 => {
                let id = arena.push_front(tag, value);
                all_ids.push(id);

                assert_eq!(arena.front(tag), Some(id));
                assert_eq!(arena.owner(id), Some(tag));
                assert_eq!(arena.get(id), Some(&value));
            }
            1 => {
                // move_to_front, possibly across lists
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    let was_live = arena.contains(id);

                    let moved = arena.move_to_front(tag, id);
                    assert_eq!(moved, was_live);
                    if moved {
                        assert_eq!(arena.front(tag), Some(id));
                        assert_eq!(arena.owner(id), Some(tag));
                    }
                }
            }
            2 => {
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    if arena.detach(id) {
                        assert_eq!(arena.owner(id), None);
                        assert!(arena.contains(id));
                    }
                }
            }
            3 => {
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    let old_total = arena.total_len();
                    if arena.remove(id).is_some() {
                        assert_eq!(arena.total_len(), old_total - 1);
                        assert!(!arena.contains(id));
                    }
                }
            }
            4 => {
                let old_len = arena.len(tag);
                let popped = arena.pop_back(tag);
                assert_eq!(popped.is_some(), old_len > 0);
                if popped.is_some() {
                    assert_eq!(arena.len(tag), old_len - 1);
                }
            }
            5 => {
                // back-to-front walk agrees with the list length
                let walked = arena.iter_rev(tag).count();
                assert_eq!(walked, arena.len(tag));
            }
            6 => {
                // prev/next are mutually consistent at the ends
                if let Some(front) = arena.front(tag) {
                    assert_eq!(arena.prev(front), None);
                }
                if let Some(back) = arena.back(tag) {
                    assert_eq!(arena.next(back), None);
                }
            }
            7 => {
                arena.clear();
                all_ids.clear();

                assert!(arena.is_empty());
                for t in TAGS {
                    assert_eq!(arena.len(t), 0);
                    assert_eq!(arena.front(t), None);
                }
            }
            _ => unreachable!(),
        }

        arena.debug_validate_invariants();
        idx += 3;
    }
});
