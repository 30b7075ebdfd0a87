use crate::hier::level::CacheLevel;
use proptest::prelude::*;

#[test]
fn empty_level_contains_nothing() {
    let level = CacheLevel::new("L1", 4, 1);
    assert!(level.is_empty());
    assert!(!level.contains(0));
    assert_eq!(level.lru(), None);
    assert_eq!(level.mru(), None);
}

#[test]
fn insert_appends_at_mru_position() {
    let mut level = CacheLevel::new("L1", 4, 1);
    assert_eq!(level.insert(1), None);
    assert_eq!(level.insert(2), None);
    assert_eq!(level.insert(3), None);
    assert_eq!(level.resident(), vec![1, 2, 3]);
    assert_eq!(level.lru(), Some(1));
    assert_eq!(level.mru(), Some(3));
}

#[test]
fn full_level_evicts_lru_head() {
    let mut level = CacheLevel::new("L1", 2, 1);
    level.insert(0xA);
    level.insert(0xB);
    assert_eq!(level.insert(0xC), Some(0xA));
    assert!(!level.contains(0xA));
    assert!(level.contains(0xB));
    assert!(level.contains(0xC));
    assert_eq!(level.len(), 2);
}

#[test]
fn touch_moves_line_to_tail() {
    let mut level = CacheLevel::new("L1", 3, 1);
    level.insert(1);
    level.insert(2);
    level.insert(3);
    assert!(level.touch(1));
    assert_eq!(level.resident(), vec![2, 3, 1]);
    assert!(level.touch(3));
    assert_eq!(level.resident(), vec![2, 1, 3]);
    // touching the MRU line is a no-op
    assert!(level.touch(3));
    assert_eq!(level.resident(), vec![2, 1, 3]);
}

#[test]
fn touched_line_survives_next_eviction() {
    let mut level = CacheLevel::new("L1", 2, 1);
    level.insert(1);
    level.insert(2);
    level.touch(1);
    assert_eq!(level.insert(3), Some(2));
    assert_eq!(level.resident(), vec![1, 3]);
}

#[test]
fn zero_capacity_level_retains_nothing() {
    let mut level = CacheLevel::new("L0", 0, 1);
    assert_eq!(level.insert(7), None);
    assert!(!level.contains(7));
    assert!(level.is_empty());
}

#[test]
fn single_line_level() {
    let mut level = CacheLevel::new("L1", 1, 1);
    level.insert(1);
    assert!(level.contains(1));
    assert_eq!(level.insert(2), Some(1));
    assert!(!level.contains(1));
    assert!(level.contains(2));
}

#[test]
fn clear_resets_residency() {
    let mut level = CacheLevel::new("L1", 2, 1);
    level.insert(1);
    level.insert(2);
    level.clear();
    assert!(level.is_empty());
    assert!(!level.contains(1));
    level.insert(3);
    assert_eq!(level.resident(), vec![3]);
}

/// Reference LRU: a plain vector with the MRU line at the end.
fn reference_access(model: &mut Vec<u64>, capacity: usize, addr: u64) {
    if let Some(pos) = model.iter().position(|&a| a == addr) {
        model.remove(pos);
        model.push(addr);
    } else if capacity > 0 {
        if model.len() == capacity {
            model.remove(0);
        }
        model.push(addr);
    }
}

proptest! {
    #[test]
    fn never_exceeds_capacity(capacity in 0usize..8, trace in prop::collection::vec(0u64..16, 0..200)) {
        let mut level = CacheLevel::new("L1", capacity, 1);
        for addr in trace {
            if level.contains(addr) {
                level.touch(addr);
            } else {
                level.insert(addr);
            }
            prop_assert!(level.len() <= capacity);
            prop_assert_eq!(level.resident().len(), level.len());
        }
    }

    #[test]
    fn matches_list_backed_lru(capacity in 0usize..6, trace in prop::collection::vec(0u64..10, 0..120)) {
        let mut level = CacheLevel::new("L1", capacity, 1);
        let mut model = Vec::new();
        for addr in trace {
            if level.contains(addr) {
                level.touch(addr);
            } else {
                level.insert(addr);
            }
            reference_access(&mut model, capacity, addr);
            prop_assert_eq!(level.resident(), model.clone());
        }
    }
}

#[test]
fn huge_capacity_level_allocates_on_demand() {
    let mut level = CacheLevel::new("L2", usize::MAX / 2, 5);
    assert_eq!(level.insert(1), None);
    assert_eq!(level.insert(2), None);
    assert!(level.touch(1));
    assert_eq!(level.resident(), vec![2, 1]);
    assert_eq!(level.capacity(), usize::MAX / 2);
}
