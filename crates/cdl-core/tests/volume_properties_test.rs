use cdl_core::models::BoundingVolume;
use proptest::prelude::*;

fn volume_strategy() -> impl Strategy<Value = BoundingVolume> {
    (
        -1.0e6f64..1.0e6,
        0.0f64..1.0e4,
        -1.0e6f64..1.0e6,
        0.0f64..1.0e4,
        0.0f64..2.0e9,
        0.0f64..4.0e7,
    )
        .prop_map(|(x, w, y, h, t, d)| BoundingVolume::new(x, x + w, y, y + h, t, t + d).unwrap())
}

proptest! {
    #[test]
    fn intersects_is_symmetric(a in volume_strategy(), b in volume_strategy()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn union_contains_both(a in volume_strategy(), b in volume_strategy()) {
        let union = a.union(&b);
        prop_assert!(union.contains(&a));
        prop_assert!(union.contains(&b));
    }

    #[test]
    fn contained_volumes_intersect(a in volume_strategy(), b in volume_strategy()) {
        if a.contains(&b) {
            prop_assert!(a.intersects(&b));
        }
        prop_assert!(a.intersects(&a));
    }

    #[test]
    fn reversed_axis_is_rejected(lo in -1.0e6f64..1.0e6, gap in 1.0e-3f64..1.0e3) {
        prop_assert!(BoundingVolume::new(lo + gap, lo, 0.0, 1.0, 0.0, 1.0).is_err());
        prop_assert!(BoundingVolume::new(0.0, 1.0, 0.0, 1.0, lo + gap, lo).is_err());
    }
}
