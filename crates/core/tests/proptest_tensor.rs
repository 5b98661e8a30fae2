//! Property tests for shapes and tensors.

use flowcorr_core::{Tensor, TensorAxes};
use proptest::prelude::*;

/// Up to four axes named from a small alphabet, each of size 1..=4.
fn axes_strategy() -> impl Strategy<Value = TensorAxes> {
    prop::collection::btree_map("[a-e]", 1usize..=4, 0..=4)
        .prop_map(|sizes| sizes.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn linear_index_round_trip(axes in axes_strategy()) {
        let t = Tensor::new(axes.clone(), |_| ()).unwrap();
        for i in 0..t.size() {
            let coordinate = t.coordinate(i).unwrap();
            prop_assert_eq!(t.linear_index(&coordinate).unwrap(), i);
        }
    }

    #[test]
    fn size_is_product(axes in axes_strategy()) {
        let expected: usize = axes.iter().map(|(_, size)| size).product();
        prop_assert_eq!(axes.numel().unwrap(), expected);
        prop_assert_eq!(Tensor::new(axes, |_| 0).unwrap().size(), expected);
    }

    #[test]
    fn merge_is_commutative(a in axes_strategy(), b in axes_strategy()) {
        match (a.merge(&b), b.merge(&a)) {
            (Ok(ab), Ok(ba)) => {
                prop_assert_eq!(&ab, &ba);
                prop_assert!(ab.numel().unwrap() >= a.numel().unwrap().max(b.numel().unwrap()));
            }
            (Err(e1), Err(e2)) => prop_assert_eq!(e1.axis(), e2.axis()),
            _ => prop_assert!(false, "merge succeeded in only one order"),
        }
    }

    #[test]
    fn scalar_broadcast_preserves_axes(axes in axes_strategy(), k in -10i64..10) {
        let t = Tensor::new(axes.clone(), |_| 1i64).unwrap();
        let scaled = (k * &t).unwrap();
        prop_assert_eq!(scaled.axes(), &axes);
        prop_assert!(scaled.materialize().unwrap().iter().all(|&v| v == k));
    }
}
