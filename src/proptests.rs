use super::*;

use proptest::prelude::*;

/// Comparisons the halving loop may take over `len` sorted keys:
/// floor(log2(len)) + 1.
fn binary_probe_bound(len: usize) -> usize {
    (usize::BITS - len.leading_zeros()) as usize
}

fn keys_strategy() -> impl Strategy<Value = Vec<Key>> {
    prop::collection::vec(0u32..64, 1..=200)
}

fn sorted_distinct_strategy() -> impl Strategy<Value = Vec<Key>> {
    prop::collection::btree_set(0u32..10_000, 1..=500).prop_map(|s| s.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_sorted_insert_keeps_order(keys in keys_strategy()) {
        let mut d = Dictionary::new(keys.len(), Order::Sorted).unwrap();
        for &k in &keys {
            d.insert(k).unwrap();
            prop_assert!(d.as_slice().windows(2).all(|w| w[0] <= w[1]));
        }
        let mut expected = keys.clone();
        expected.sort_unstable();
        prop_assert_eq!(d.as_slice(), expected.as_slice());
    }

    #[test]
    fn prop_unsorted_insert_keeps_arrival_order(keys in keys_strategy()) {
        let mut d = Dictionary::new(keys.len(), Order::Unsorted).unwrap();
        prop_assert_eq!(d.bulk_insert(&keys).unwrap(), keys.len());
        prop_assert_eq!(d.as_slice(), keys.as_slice());
    }

    #[test]
    fn prop_overflow_keeps_first_capacity_keys(keys in keys_strategy(), order_sorted in any::<bool>()) {
        let cap = keys.len() - 1;
        let order = if order_sorted { Order::Sorted } else { Order::Unsorted };
        let mut d = Dictionary::new(cap, order).unwrap();
        let is_overflow = matches!(d.bulk_insert(&keys), Err(Error::CapacityExceeded { .. }));
        prop_assert!(is_overflow);
        prop_assert_eq!(d.len(), cap);

        let mut kept = keys[..cap].to_vec();
        if order == Order::Sorted {
            kept.sort_unstable();
        }
        prop_assert_eq!(d.as_slice(), kept.as_slice());
    }

    #[test]
    fn prop_binary_search_bound(table in sorted_distinct_strategy(), probe in 0u32..10_001) {
        let mut t = table.clone();
        let last = t.len() - 1;
        let out = BinarySearch.search(&mut t, 0..=last, probe).unwrap();
        prop_assert!(out.ops >= 1);
        prop_assert!(out.ops <= binary_probe_bound(t.len()), "ops {} len {}", out.ops, t.len());
        prop_assert_eq!(out.position, table.binary_search(&probe).ok());
        prop_assert_eq!(t, table);
    }

    #[test]
    fn prop_linear_search_counts(table in keys_strategy(), probe in 0u32..64) {
        let mut t = table.clone();
        let last = t.len() - 1;
        let out = LinearSearch.search(&mut t, 0..=last, probe).unwrap();
        match table.iter().position(|&k| k == probe) {
            Some(i) => {
                prop_assert_eq!(out.position, Some(i));
                prop_assert_eq!(out.ops, i + 1);
            }
            None => {
                prop_assert_eq!(out.position, None);
                prop_assert_eq!(out.ops, table.len());
            }
        }
        prop_assert_eq!(t, table);
    }

    #[test]
    fn prop_self_organizing_single_swap(
        table in keys_strategy(),
        probe in 0u32..64,
        split in any::<prop::sample::Index>(),
    ) {
        // Search a suffix range so that the front-of-range rule is exercised
        // away from index 0.
        let first = split.index(table.len());
        let last = table.len() - 1;
        let mut t = table.clone();
        let out = SelfOrganizingSearch.search(&mut t, first..=last, probe).unwrap();

        match table[first..].iter().position(|&k| k == probe).map(|i| first + i) {
            Some(i) if i > first => {
                prop_assert_eq!(out.position, Some(i - 1));
                prop_assert_eq!(out.ops, i - first + 1);
                let mut expected = table.clone();
                expected.swap(i - 1, i);
                prop_assert_eq!(t[i - 1], probe);
                prop_assert_eq!(t[i], table[i - 1]);
                prop_assert_eq!(t, expected);
            }
            Some(i) => {
                prop_assert_eq!(out.position, Some(i));
                prop_assert_eq!(out.ops, 1);
                prop_assert_eq!(t, table);
            }
            None => {
                prop_assert_eq!(out.position, None);
                prop_assert_eq!(out.ops, last - first + 1);
                prop_assert_eq!(t, table);
            }
        }
    }

    #[test]
    fn prop_uniform_exact_cover(max in 1u32..2_000) {
        let mut keys = vec![0; max as usize];
        uniform_keys(&mut keys, max);
        keys.sort_unstable();
        prop_assert_eq!(keys, (1..=max).collect::<Vec<_>>());
    }
}

#[test]
fn binary_probe_bound_small_sizes() {
    assert_eq!(binary_probe_bound(1), 1);
    assert_eq!(binary_probe_bound(2), 2);
    assert_eq!(binary_probe_bound(8), 4);
    assert_eq!(binary_probe_bound(10), 4);
}

#[test]
fn binary_probe_bound_is_tight() {
    // Missing keys past the end walk the full right spine.
    for len in 1..=300usize {
        let mut t: Vec<Key> = (1..=len as Key).collect();
        let out = BinarySearch.search(&mut t, 0..=len - 1, len as Key + 1).unwrap();
        assert_eq!(out.ops, binary_probe_bound(len), "len {len}");
    }
}

#[test]
fn exhaustive_sorted_insert_small_set() {
    let keys: Vec<Key> = vec![4, 1, 3, 1, 2];
    let mut perms = vec![keys.clone()];
    // All rotations and their reversals cover a representative spread of arrival orders.
    for r in 1..keys.len() {
        let mut p = keys.clone();
        p.rotate_left(r);
        perms.push(p);
    }
    let reversed: Vec<Vec<Key>> = perms.iter().map(|p| p.iter().rev().copied().collect()).collect();
    perms.extend(reversed);

    for p in perms {
        let mut d = Dictionary::new(p.len(), Order::Sorted).unwrap();
        d.bulk_insert(&p).unwrap();
        assert_eq!(d.as_slice(), &[1, 1, 2, 3, 4], "arrival order {p:?}");
    }
}
