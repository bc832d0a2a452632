//! Property-based tests using proptest
//!
//! Random operation sequences are checked against a plain vector model:
//! the heap must agree with the model on minimum, size, and the multiset
//! of stored values at every step.

use binomial_forest::{BinomialHeap, HeapError};
use proptest::prelude::*;

fn drain(heap: &mut BinomialHeap<i32>) -> Vec<i32> {
    let mut out = Vec::new();
    while let Ok(v) = heap.extract_min() {
        out.push(v);
    }
    out
}

proptest! {
    #[test]
    fn insert_then_drain_sorts(values in prop::collection::vec(-1000..1000i32, 0..200)) {
        let mut heap = BinomialHeap::new();
        for &v in &values {
            heap.insert(v);
        }
        prop_assert_eq!(heap.size(), values.len());
        match values.iter().min() {
            Some(&min) => prop_assert_eq!(heap.get_min(), Ok(min)),
            None => prop_assert_eq!(heap.get_min(), Err(HeapError::EmptyHeap)),
        }

        let mut expected = values.clone();
        expected.sort();
        prop_assert_eq!(drain(&mut heap), expected);
        prop_assert!(heap.is_empty());
    }

    #[test]
    fn union_is_multiset_union(
        a_values in prop::collection::vec(-500..500i32, 0..100),
        b_values in prop::collection::vec(-500..500i32, 0..100),
    ) {
        let mut a = BinomialHeap::new();
        for &v in &a_values {
            a.insert(v);
        }
        let mut b = BinomialHeap::new();
        for &v in &b_values {
            b.insert(v);
        }

        a.union(&mut b);
        prop_assert!(b.is_empty());
        prop_assert_eq!(a.size(), a_values.len() + b_values.len());

        let mut expected: Vec<i32> = a_values.iter().chain(b_values.iter()).copied().collect();
        expected.sort();
        prop_assert_eq!(drain(&mut a), expected);
    }

    #[test]
    fn interleaved_insert_extract_tracks_model(
        ops in prop::collection::vec((any::<bool>(), -500..500i32), 0..300),
    ) {
        let mut heap = BinomialHeap::new();
        let mut model: Vec<i32> = Vec::new();

        for (should_extract, value) in ops {
            if should_extract && !model.is_empty() {
                let extracted = heap.extract_min();
                let pos = model
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, v)| **v)
                    .map(|(i, _)| i)
                    .unwrap();
                prop_assert_eq!(extracted, Ok(model.remove(pos)));
            } else {
                heap.insert(value);
                model.push(value);
            }
            prop_assert_eq!(heap.size(), model.len());
            prop_assert_eq!(heap.is_empty(), model.is_empty());
            match model.iter().min() {
                Some(&min) => prop_assert_eq!(heap.get_min(), Ok(min)),
                None => prop_assert_eq!(heap.get_min(), Err(HeapError::EmptyHeap)),
            }
        }
    }

    #[test]
    fn decrease_key_tracks_model(
        count in 1..40usize,
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..25),
    ) {
        // Distinct starting values; each decrease assigns a fresh, strictly
        // smaller value from a descending negative counter so targets stay
        // unambiguous.
        let mut heap = BinomialHeap::new();
        let mut model: Vec<i32> = (0..count as i32).map(|i| i * 10).collect();
        for &v in &model {
            heap.insert(v);
        }

        let mut next_new = -1i32;
        for pick in picks {
            let idx = pick.index(model.len());
            let old = model[idx];
            let new = next_new;
            next_new -= 1;

            prop_assert_eq!(heap.decrease_key(&old, new), Ok(()));
            model[idx] = new;

            prop_assert!(heap.find_key(&new).is_some());
            prop_assert!(heap.find_key(&old).is_none());
            prop_assert_eq!(heap.get_min(), Ok(*model.iter().min().unwrap()));
            prop_assert_eq!(heap.size(), model.len());
        }

        let mut expected = model.clone();
        expected.sort();
        prop_assert_eq!(drain(&mut heap), expected);
    }

    #[test]
    fn delete_key_tracks_model(
        values in prop::collection::vec(-100..100i32, 1..80),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..40),
    ) {
        let mut heap = BinomialHeap::new();
        let mut model = values.clone();
        for &v in &values {
            heap.insert(v);
        }

        for pick in picks {
            if model.is_empty() {
                break;
            }
            let idx = pick.index(model.len());
            let target = model[idx];
            prop_assert_eq!(heap.delete_key(&target), Ok(target));
            model.remove(idx);
            prop_assert_eq!(heap.size(), model.len());
            if !model.contains(&target) {
                prop_assert!(heap.find_key(&target).is_none());
            }
        }

        // A value outside the inserted range is never present
        prop_assert_eq!(heap.delete_key(&1000), Err(HeapError::KeyNotFound));

        let mut expected = model.clone();
        expected.sort();
        prop_assert_eq!(drain(&mut heap), expected);
    }

    #[test]
    fn deep_clone_matches_original(values in prop::collection::vec(-200..200i32, 0..60)) {
        let mut heap = BinomialHeap::new();
        for &v in &values {
            heap.insert(v);
        }
        let mut copy = heap.clone();
        prop_assert_eq!(copy.size(), heap.size());

        let mut expected = values.clone();
        expected.sort();
        prop_assert_eq!(drain(&mut copy), expected.clone());
        // Draining the copy left the original intact
        prop_assert_eq!(heap.size(), values.len());
        prop_assert_eq!(drain(&mut heap), expected);
    }
}
