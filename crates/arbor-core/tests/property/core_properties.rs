//! Property tests for the built-in distances and node scores.

use arbor_core::{DistanceKind, IDistance, INodeScorer, NodeScoreKind};
use proptest::prelude::*;

fn distribution() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0..1.0f64, 4)
}

proptest! {
    #[test]
    fn distances_are_non_negative(a in distribution(), b in distribution()) {
        for kind in [
            DistanceKind::Cosine,
            DistanceKind::Euclidean,
            DistanceKind::Entropy,
            DistanceKind::Hellinger,
        ] {
            prop_assert!(kind.distance(&a, &b) >= 0.0, "{} went negative", kind.as_str());
        }
    }

    #[test]
    fn symmetric_distances_are_symmetric(a in distribution(), b in distribution()) {
        let kinds = [
            DistanceKind::Cosine,
            DistanceKind::Euclidean,
            DistanceKind::Hellinger,
        ];
        for kind in kinds {
            let (ab, ba) = (kind.distance(&a, &b), kind.distance(&b, &a));
            prop_assert!((ab - ba).abs() < 1e-9);
        }
    }

    #[test]
    fn density_grows_with_prize(
        prize in 0.0..100.0f64,
        extra in 0.0..100.0f64,
        cost in 0.01..50.0f64,
    ) {
        let density = NodeScoreKind::Density;
        prop_assert!(density.score(prize, cost) <= density.score(prize + extra, cost));
    }
}
