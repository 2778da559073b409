#[cfg(test)]
#[allow(clippy::question_mark_used)]
mod model_tests {
    use std::collections::BTreeSet;

    use proptest::{
        collection::vec,
        prelude::*,
        proptest,
    };

    use crate::{
        config::Config,
        skiplist::{
            ScriptedLevelGenerator,
            SkipList,
        },
    };

    #[derive(Debug, Clone)]
    enum Op {
        Insert(i32),
        Delete(i32),
        Search(i32),
        Select(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (-200i32..200).prop_map(Op::Insert),
            2 => (-200i32..200).prop_map(Op::Delete),
            1 => (-200i32..200).prop_map(Op::Search),
            1 => (0usize..300).prop_map(Op::Select),
        ]
    }

    fn list_with_seed(seed: u64, max_level: usize) -> SkipList<i32> {
        let config = Config::builder()
            .max_level(max_level)
            .seed(seed)
            .build()
            .unwrap();
        SkipList::with_config(config).unwrap()
    }

    proptest! {
        #[test]
        fn test_matches_btreeset(
            seed in any::<u64>(),
            max_level in 1usize..12,
            ops in vec(op(), 1..300),
        ) {
            let mut list = list_with_seed(seed, max_level);
            let mut model = BTreeSet::new();

            for op in ops {
                match op {
                    | Op::Insert(key) => {
                        prop_assert_eq!(list.insert(key).unwrap(), model.insert(key));
                    },
                    | Op::Delete(key) => {
                        let expected = model.remove(&key).then_some(key);
                        prop_assert_eq!(list.delete(&key), expected);
                    },
                    | Op::Search(key) => {
                        prop_assert_eq!(list.search(&key), model.get(&key));
                    },
                    | Op::Select(rank) => {
                        let expected = rank.checked_sub(1).and_then(|idx| model.iter().nth(idx));
                        prop_assert_eq!(list.select(rank).ok(), expected);
                    },
                }
                prop_assert!(list.check_invariants().is_ok(), "{:?}", list.check_invariants());
                prop_assert_eq!(list.len(), model.len());
                prop_assert!(list.max_level() <= max_level);
            }

            let keys: Vec<_> = list.iter().copied().collect();
            let expected: Vec<_> = model.iter().copied().collect();
            prop_assert_eq!(keys, expected);
        }

        #[test]
        fn test_select_is_inverse_of_rank(
            seed in any::<u64>(),
            keys in vec(any::<i32>(), 0..200),
        ) {
            let mut list = list_with_seed(seed, 16);
            for key in &keys {
                list.insert(*key).unwrap();
            }

            let sorted: Vec<_> = keys.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
            prop_assert_eq!(list.len(), sorted.len());
            for (idx, key) in sorted.iter().enumerate() {
                prop_assert_eq!(list.select(idx + 1), Ok(key));
                prop_assert_eq!(list.rank(key), Some(idx + 1));
            }
            prop_assert!(list.select(0).is_err());
            prop_assert!(list.select(sorted.len() + 1).is_err());
        }

        #[test]
        fn test_any_tower_layout(
            levels in vec(1usize..=6, 1..40),
            keys in vec(0u16..500, 1..120),
            removals in vec(0u16..500, 0..120),
        ) {
            let generator = ScriptedLevelGenerator::new(6, levels);
            let mut list = SkipList::with_generator(6, generator).unwrap();
            let mut model = BTreeSet::new();

            for key in keys {
                list.insert(key).unwrap();
                model.insert(key);
            }
            prop_assert!(list.check_invariants().is_ok(), "{:?}", list.check_invariants());

            for key in removals {
                prop_assert_eq!(list.delete(&key).is_some(), model.remove(&key));
                prop_assert!(list.check_invariants().is_ok(), "{:?}", list.check_invariants());
            }

            prop_assert_eq!(list.first(), model.first());
            prop_assert_eq!(list.last(), model.last());
            if model.is_empty() {
                prop_assert_eq!(list.max_level(), 1);
            }
        }
    }
}
