#[cfg(test)]
mod tests {
    use crate::dataset::{Attribute, Dataset, EntityId, Value};
    use crate::distance::{EuclideanDistance, MeasureKind, SquaredEuclideanDistance};
    use crate::metrics::RandIndex;
    use crate::{EvaluationConfig, Evaluator, Result};
    use proptest::prelude::*;

    fn plane(rows: &[(&str, f64, f64)]) -> Dataset {
        Dataset::from_rows(
            vec![
                Attribute::numeric("x"),
                Attribute::numeric("y"),
                Attribute::nominal("cluster").with_role("cluster"),
            ],
            rows.iter().enumerate().map(|(i, &(label, x, y))| {
                (
                    EntityId::from(i as u64),
                    vec![Value::from(x), Value::from(y), Value::from(label)],
                )
            }),
        )
        .unwrap()
    }

    fn labels(rows: &[(&str, &str)]) -> Dataset {
        Dataset::from_rows(
            vec![Attribute::nominal("cluster").with_role("cluster")],
            rows.iter()
                .map(|&(id, label)| (EntityId::from(id), vec![Value::from(label)])),
        )
        .unwrap()
    }

    #[test]
    fn test_dunn_two_clusters() -> Result<()> {
        let data = plane(&[("A", 0.0, 0.0), ("A", 0.0, 1.0), ("B", 5.0, 5.0), ("B", 5.0, 6.0)]);
        let dunn = Evaluator::default().dunn_index(&data, &mut EuclideanDistance::new())?;

        // (0,1) to (5,5)
        let min_inter = (25.0f64 + 16.0).sqrt();
        assert!((dunn.max_intra - 1.0).abs() < 1e-12);
        assert!((dunn.min_inter - min_inter).abs() < 1e-12);
        assert!((dunn.value - min_inter).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_dunn_default_divergence() -> Result<()> {
        let data = plane(&[("A", 0.0, 0.0), ("A", 0.0, 1.0), ("B", 5.0, 5.0), ("B", 5.0, 6.0)]);
        let dunn = Evaluator::default().dunn_index(&data, &mut SquaredEuclideanDistance::new())?;
        assert!((dunn.value - 41.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_rand_hand_computed() -> Result<()> {
        let a = labels(&[("x", "c1"), ("y", "c1"), ("z", "c2")]);
        let b = labels(&[("x", "c1"), ("y", "c2"), ("z", "c2")]);

        // (x,y): same in A, different in B -> c
        // (x,z): different in both         -> b
        // (y,z): different in A, same in B -> d
        let index = Evaluator::default().rand_index(&a, &b)?;
        assert_eq!(index.value(), Some(1.0 / 3.0));
        assert_eq!(index.as_sentinel(), 1.0 / 3.0);
        Ok(())
    }

    #[test]
    fn test_rand_sentinels() -> Result<()> {
        let evaluator = Evaluator::default();
        let three = labels(&[("x", "c1"), ("y", "c1"), ("z", "c2")]);
        let two = labels(&[("x", "c1"), ("y", "c1")]);
        let renamed = labels(&[("x", "c1"), ("y", "c1"), ("w", "c2")]);
        let one = labels(&[("x", "c1")]);

        assert_eq!(evaluator.rand_index(&three, &two)?.as_sentinel(), -1.0);
        assert_eq!(evaluator.rand_index(&three, &renamed)?.as_sentinel(), -2.0);
        assert_eq!(evaluator.rand_index(&one, &one)?, RandIndex::IdentityMismatch);
        Ok(())
    }

    #[test]
    fn test_rand_matches_by_identity() -> Result<()> {
        let a = labels(&[("x", "c1"), ("y", "c1"), ("z", "c2")]);
        let shuffled = labels(&[("z", "k2"), ("x", "k1"), ("y", "k1")]);
        assert_eq!(Evaluator::default().rand_index(&a, &shuffled)?, RandIndex::Value(1.0));
        Ok(())
    }

    #[test]
    fn test_silhouette_write_back_round() -> Result<()> {
        let mut data = plane(&[
            ("A", 0.0, 0.0),
            ("B", 10.0, 0.0),
            ("A", 0.0, 1.0),
            ("C", 20.0, 20.0),
            ("B", 10.0, 1.0),
        ]);
        let evaluator = Evaluator::default();
        let silhouette = evaluator.silhouette(&data, &mut MeasureKind::Euclidean.build())?;
        evaluator.write_back_silhouette(&mut data, &silhouette)?;

        let (index, attribute) = data.attribute("silhouette")?;
        assert!(attribute.is_special());
        let (cluster, _) = data.attribute("cluster")?;

        // Walk each cluster's entities in dataset order; they consume the
        // coefficients of that cluster in turn.
        let mut seen = std::collections::BTreeMap::<String, usize>::new();
        for entity in &data {
            let label = entity.value(cluster).to_string();
            let k = seen.entry(label.clone()).or_insert(0);
            let expected = silhouette.cluster_coefficients(&label).unwrap()[*k];
            assert_eq!(entity.value(index), &Value::Numeric(expected));
            *k += 1;
        }
        // C is a singleton.
        assert_eq!(silhouette.cluster_coefficients("C"), Some(&[0.0][..]));
        Ok(())
    }

    #[test]
    fn test_typical_values_workflow() -> Result<()> {
        let data = Dataset::from_rows(
            vec![
                Attribute::numeric("age"),
                Attribute::nominal("city"),
                Attribute::nominal("cluster").with_role("cluster"),
            ],
            vec![
                ("1".into(), vec![1.0.into(), "rome".into(), "c1".into()]),
                ("2".into(), vec![2.0.into(), "rome".into(), "c1".into()]),
                ("3".into(), vec![3.0.into(), "oslo".into(), "c1".into()]),
                ("4".into(), vec![4.0.into(), "rome".into(), "c1".into()]),
                ("5".into(), vec![5.0.into(), "oslo".into(), "c2".into()]),
            ],
        )?;

        let strict = Evaluator::default().typical_values(&data)?;
        assert_eq!(strict.global()["age"].iter().collect::<Vec<_>>(), ["3"]);
        assert_eq!(strict.global()["city"].iter().collect::<Vec<_>>(), ["rome"]);
        assert_eq!(strict.cluster("c1").unwrap()["age"].iter().collect::<Vec<_>>(), ["2"]);
        assert!(strict.cluster("c2").unwrap()["city"].is_empty());

        let lenient = Evaluator::new(EvaluationConfig::new().with_min_mode_count(1))?;
        let lenient = lenient.typical_values(&data)?;
        assert_eq!(lenient.cluster("c2").unwrap()["city"].iter().collect::<Vec<_>>(), ["oslo"]);
        Ok(())
    }

    fn labeling() -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(0u8..4, 0..20)
    }

    fn from_labels(values: &[u8]) -> Dataset {
        Dataset::from_rows(
            vec![Attribute::nominal("cluster")],
            values.iter().enumerate().map(|(i, l)| {
                (EntityId::from(i as u64), vec![Value::from(format!("c{l}"))])
            }),
        )
        .unwrap()
    }

    proptest! {
        #[test]
        fn rand_is_symmetric(pairs in proptest::collection::vec((0u8..4, 0u8..4), 0..20)) {
            let (a, b): (Vec<u8>, Vec<u8>) = pairs.into_iter().unzip();
            let a = from_labels(&a);
            let b = from_labels(&b);
            let evaluator = Evaluator::default();
            prop_assert_eq!(evaluator.rand_index(&a, &b).unwrap(), evaluator.rand_index(&b, &a).unwrap());
        }

        #[test]
        fn rand_sentinels_hold(a in labeling(), b in labeling()) {
            let index = Evaluator::default()
                .rand_index(&from_labels(&a), &from_labels(&b))
                .unwrap();
            if a.len() != b.len() {
                prop_assert_eq!(index.as_sentinel(), -1.0);
            } else if a.len() <= 1 {
                prop_assert_eq!(index.as_sentinel(), -2.0);
            } else {
                let value = index.value().unwrap();
                prop_assert!((0.0..=1.0).contains(&value));
            }
        }

        #[test]
        fn dunn_is_zero_only_when_degenerate(
            rows in proptest::collection::vec((0u8..3, 0i8..6, 0i8..6), 2..20)
        ) {
            let labels: Vec<String> = rows.iter().map(|(l, _, _)| format!("c{l}")).collect();
            let points: Vec<(&str, f64, f64)> = labels
                .iter()
                .zip(&rows)
                .map(|(label, &(_, x, y))| (label.as_str(), f64::from(x), f64::from(y)))
                .collect();
            let data = plane(&points);
            let evaluator = Evaluator::default();

            match evaluator.dunn_index(&data, &mut EuclideanDistance::new()) {
                Ok(dunn) => {
                    prop_assert!(dunn.value >= 0.0);
                    let degenerate = dunn.max_intra == 0.0 || dunn.min_inter == 0.0;
                    prop_assert_eq!(dunn.value == 0.0, degenerate);
                }
                Err(_) => {
                    let distinct: std::collections::BTreeSet<_> = labels.iter().collect();
                    prop_assert!(distinct.len() < 2);
                }
            }
        }
    }
}
