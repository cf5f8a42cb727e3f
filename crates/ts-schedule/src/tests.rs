//! Unit tests for ts-schedule.

#[cfg(test)]
mod layers {
    use proptest::prelude::*;

    use crate::{Layers, ScheduleError};

    #[test]
    fn register_and_read_back() {
        let mut l = Layers::new();
        l.register(5, "a");
        l.register(5, "b");
        l.register(1, "c");

        assert_eq!(l.len(), 3);
        assert_eq!(l.layer_count(), 2);
        assert_eq!(l.items(5).unwrap(), &["a", "b"]);
        assert_eq!(l.items(1).unwrap(), &["c"]);
    }

    #[test]
    fn layers_iterate_ascending() {
        let mut l = Layers::new();
        for layer in [3, -2, 10, 3, 0] {
            l.register(layer, ());
        }
        assert_eq!(l.layers().collect::<Vec<_>>(), vec![-2, 0, 3, 10]);
    }

    #[test]
    fn unknown_layer_is_an_error() {
        let mut l = Layers::new();
        l.register(0, 1u8);
        assert_eq!(l.items(7), Err(ScheduleError::UnknownLayer(7)));
    }

    #[test]
    fn drained_layer_stays_registered() {
        let mut l = Layers::new();
        l.register(2, 10);
        l.register(2, 11);
        assert_eq!(l.remove_where(2, |_| true), 2);

        assert!(l.is_empty());
        assert!(l.contains_layer(2));
        assert_eq!(l.items(2).unwrap(), &[] as &[i32]);
        assert_eq!(l.layers().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn remove_where_only_touches_one_layer() {
        let mut l = Layers::new();
        l.register(1, 4);
        l.register(1, 5);
        l.register(1, 6);
        l.register(2, 4);

        assert_eq!(l.remove_where(1, |&x| x % 2 == 0), 2);
        assert_eq!(l.items(1).unwrap(), &[5]);
        assert_eq!(l.items(2).unwrap(), &[4]);
        assert_eq!(l.len(), 2);
    }

    #[test]
    fn remove_where_on_absent_layer_is_noop() {
        let mut l: Layers<u32> = Layers::default();
        assert_eq!(l.remove_where(9, |_| true), 0);
        assert!(!l.contains_layer(9));
    }

    #[test]
    fn iter_is_execution_order() {
        let mut l = Layers::new();
        l.register(2, 'x');
        l.register(0, 'a');
        l.register(2, 'y');
        l.register(0, 'b');
        let order: Vec<_> = l.iter().collect();
        assert_eq!(order, vec![(0, &'a'), (0, &'b'), (2, &'x'), (2, &'y')]);
    }

    proptest! {
        #[test]
        fn layers_sorted_and_unique(keys in prop::collection::vec(-50i32..50, 0..64)) {
            let mut l = Layers::new();
            for (i, &k) in keys.iter().enumerate() {
                l.register(k, i);
            }
            let layers: Vec<i32> = l.layers().collect();
            prop_assert!(layers.windows(2).all(|w| w[0] < w[1]));

            let mut expected = keys.clone();
            expected.sort_unstable();
            expected.dedup();
            prop_assert_eq!(layers, expected);
        }

        #[test]
        fn item_appears_once_at_insertion_position(
            before in 0usize..10,
            after in 0usize..10,
            noise in prop::collection::vec(-5i32..5, 0..20),
        ) {
            let mut l = Layers::new();
            for n in &noise {
                l.register(*n, u32::MAX);
            }
            for i in 0..before {
                l.register(5, i as u32);
            }
            l.register(5, 1_000);
            for i in 0..after {
                l.register(5, 2_000 + i as u32);
            }

            let items = l.items(5).unwrap();
            prop_assert_eq!(items.iter().filter(|&&x| x == 1_000).count(), 1);
            let pos = items.iter().position(|&x| x == 1_000).unwrap();
            prop_assert_eq!(pos, before);
        }

        #[test]
        fn replay_reproduces_order(ops in prop::collection::vec((0i32..4, any::<bool>()), 0..40)) {
            let build = || {
                let mut l = Layers::new();
                for (i, &(layer, remove)) in ops.iter().enumerate() {
                    if remove {
                        l.remove_where(layer, |&x: &usize| x % 3 == 0);
                    } else {
                        l.register(layer, i);
                    }
                }
                l.iter().map(|(layer, &x)| (layer, x)).collect::<Vec<_>>()
            };
            prop_assert_eq!(build(), build());
        }
    }
}
