//! Evaluate a small labeled dataset with every workflow.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example evaluate_clusters
//! ```

use cluster_validity::dataset::{Attribute, Dataset, Value};
use cluster_validity::distance::MeasureKind;
use cluster_validity::{EvaluationConfig, Evaluator, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let rows = [
        ("p1", 1.0, 1.2, "small", "c1"),
        ("p2", 1.4, 0.9, "small", "c1"),
        ("p3", 0.8, 1.1, "small", "c1"),
        ("p4", 5.0, 5.1, "large", "c2"),
        ("p5", 5.3, 4.8, "large", "c2"),
        ("p6", 4.9, 5.2, "large", "c2"),
        ("p7", 9.0, 0.5, "small", "c3"),
    ];
    let mut data = Dataset::from_rows(
        vec![
            Attribute::numeric("x"),
            Attribute::numeric("y"),
            Attribute::nominal("size"),
            Attribute::nominal("cluster").with_role("cluster"),
        ],
        rows.iter().map(|&(id, x, y, size, label)| {
            (
                id.into(),
                vec![Value::from(x), Value::from(y), Value::from(size), Value::from(label)],
            )
        }),
    )?;

    let evaluator = Evaluator::new(EvaluationConfig::new().with_min_mode_count(2))?;

    let typical = evaluator.typical_values(&data)?;
    println!("typical values (all): {:?}", typical.global());
    for (label, values) in typical.clusters() {
        println!("typical values ({label}): {values:?}");
    }

    for kind in MeasureKind::ALL {
        let mut measure = kind.build();
        let dunn = evaluator.dunn_index(&data, &mut measure)?;
        println!(
            "dunn [{kind}]: {:.4} (min inter {:.4}, max intra {:.4})",
            dunn.value, dunn.min_inter, dunn.max_intra
        );
    }

    let silhouette = evaluator.silhouette(&data, &mut MeasureKind::Euclidean.build())?;
    for (label, mean) in silhouette.cluster_means() {
        println!("silhouette ({label}): {mean:.4}");
    }
    if let Some(overall) = silhouette.overall_mean() {
        println!("silhouette (all): {overall:.4}");
    }
    evaluator.write_back_silhouette(&mut data, &silhouette)?;
    let (column, _) = data.attribute("silhouette")?;
    for entity in &data {
        println!("  {} -> {}", entity.id(), entity.value(column));
    }

    let relabeled = Dataset::from_rows(
        vec![Attribute::nominal("cluster")],
        rows.iter().map(|&(id, _, _, size, _)| (id.into(), vec![Value::from(size)])),
    )?;
    let rand = evaluator.rand_index(&data, &relabeled)?;
    println!("rand index against size labels: {rand}");

    Ok(())
}
