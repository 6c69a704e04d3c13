use std::cmp::Ordering;
use std::collections::VecDeque;

use cowlist::ord::{insertion_point, is_sorted};
use cowlist::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const PROBES: [Probe; 3] = [Probe::Forward, Probe::Backward, Probe::Bisect];

/// A value that is only compared by its key.
#[derive(Debug, Clone, Copy)]
struct Tagged {
    key: u8,
    tag: usize,
}

impl PartialEq for Tagged {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Tagged {}

impl PartialOrd for Tagged {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tagged {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

fn random_sorted(rng: &mut StdRng) -> Vec<u32> {
    let len = rng.random_range(0..40);
    let mut seq = (0..len)
        .map(|_| rng.random_range(0..16))
        .collect::<Vec<u32>>();
    seq.sort_unstable();
    seq
}

#[test]
fn insert_keeps_sequence_sorted_and_complete() {
    let mut rng = StdRng::seed_from_u64(123);
    for _ in 0..500 {
        let seq = random_sorted(&mut rng);
        let value = rng.random_range(0..18);

        let mut expected = seq.clone();
        expected.push(value);
        expected.sort_unstable();

        for probe in PROBES {
            let mut result = seq.clone();
            let index = insert_in_order_with(&mut result, value, probe);

            assert!(is_sorted(&result), "{probe:?} {seq:?} + {value}");
            assert_eq!(result.len(), seq.len() + 1);
            assert_eq!(result, expected, "not a permutation of S + [v]");
            assert_eq!(result[index], value);
            // the value is placed behind all equal elements
            assert!(result.get(index + 1).map_or(true, |next| *next > value));
        }
    }
}

#[test]
fn probes_agree_on_insertion_points() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let seq = random_sorted(&mut rng);
        let value = rng.random_range(0..18);
        let forward = insertion_point(&seq, &value, Probe::Forward);
        assert_eq!(insertion_point(&seq, &value, Probe::Backward), forward);
        assert_eq!(insertion_point(&seq, &value, Probe::Bisect), forward);
    }
}

#[test]
fn repeated_inserts_equal_a_stable_sort() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let values = (0..rng.random_range(0..60))
            .map(|tag| Tagged {
                key: rng.random_range(0..5),
                tag,
            })
            .collect::<Vec<_>>();

        let mut expected = values.clone();
        expected.sort_by_key(|t| t.key);
        let expected = expected.iter().map(|t| t.tag).collect::<Vec<_>>();

        for probe in PROBES {
            let mut seq = VecDeque::new();
            for value in &values {
                insert_in_order_with(&mut seq, *value, probe);
            }
            let tags = seq.iter().map(|t| t.tag).collect::<Vec<_>>();
            assert_eq!(tags, expected, "{probe:?}");
        }
    }
}

#[test]
fn shuffled_inserts_build_a_sorted_list() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut values = (0..200).collect::<Vec<u32>>();
    values.shuffle(&mut rng);

    let list = CowList::builder().probe(Probe::Bisect).build();
    for value in values {
        list.insert_in_order(value);
    }
    assert_eq!(list.to_vec(), (0..200).collect::<Vec<_>>());
    assert_eq!(list.version(), 200);
}

#[test]
fn insert_three_two_one_three() {
    let list = CowList::new();
    for value in ["3", "2", "1", "3"] {
        list.insert_in_order(value.to_string());
    }
    assert_eq!(list.to_vec(), ["1", "2", "3", "3"]);

    let mut seq = Vec::new();
    for value in ["3", "2", "1", "3"] {
        insert_in_order(&mut seq, value.to_string());
    }
    assert_eq!(seq, ["1", "2", "3", "3"]);
}

#[test]
fn insert_equal_values_in_arrival_order() {
    let list = CowList::new();
    for tag in 0..3 {
        let index = list.insert_in_order(Tagged { key: b'a', tag });
        assert_eq!(index, tag);
    }

    let snapshot = list.snapshot();
    assert!(snapshot.iter().all(|t| t.key == b'a'));
    assert_eq!(
        snapshot.iter().map(|t| t.tag).collect::<Vec<_>>(),
        [0, 1, 2]
    );
}

#[test]
fn boundaries() {
    let mut seq: Vec<&str> = Vec::new();
    assert_eq!(insert_in_order(&mut seq, "m"), 0);
    assert_eq!(seq, ["m"]);

    assert_eq!(insert_in_order(&mut seq, "a"), 0);
    assert_eq!(insert_in_order(&mut seq, "z"), 2);
    assert_eq!(seq, ["a", "m", "z"]);
}

#[test]
fn mixed_values_are_rejected() {
    let mut seq = vec![Value::from("a"), Value::from("c")];
    assert_eq!(try_insert_in_order(&mut seq, Value::from("b")), Ok(1));

    let err = try_insert_in_order(&mut seq, Value::from(1_i64)).unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(err, Error::TypeMismatch { index: 0 });
    assert_eq!(seq.len(), 3);
}

#[test]
fn numeric_values_interleave() {
    let list = CowList::new();
    for value in [Value::from(2_i64), Value::from(0.5_f64), Value::from(1_i64)] {
        list.try_insert_in_order(value).unwrap();
    }
    assert_eq!(list.to_string(), "[0.5, 1, 2]");
}
