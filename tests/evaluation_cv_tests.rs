use approx::assert_relative_eq;
use rfsp_rs::prelude::*;

// ============================================================================
// K-Fold Tests
// ============================================================================

#[test]
fn test_unshuffled_folds_are_contiguous() {
    let assignment = KFold::new(3).partition(7).unwrap();
    // fold_size = 2, last fold takes the remainder
    assert_eq!(assignment, [0, 0, 1, 1, 2, 2, 2]);
}

#[test]
fn test_folds_cover_every_row_once() {
    let folds = KFold::new(4).seed(42).split(10).unwrap();
    assert_eq!(folds.len(), 4);

    let mut tested: Vec<usize> = folds.iter().flat_map(|f| f.test.iter().copied()).collect();
    tested.sort_unstable();
    assert_eq!(tested, (0..10).collect::<Vec<_>>());

    for fold in &folds {
        assert_eq!(fold.train.len() + fold.test.len(), 10);
        assert!(fold.test.iter().all(|i| !fold.train.contains(i)));
    }
}

#[test]
fn test_seeded_partition_is_reproducible() {
    let a = KFold::new(5).seed(7).partition(50).unwrap();
    let b = KFold::new(5).seed(7).partition(50).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, KFold::new(5).partition(50).unwrap());
}

#[test]
fn test_invalid_fold_counts() {
    assert_eq!(
        KFold::new(1).partition(10),
        Err(RfspError::InvalidFolds { k: 1, n: 10 })
    );
    assert_eq!(
        KFold::new(11).partition(10),
        Err(RfspError::InvalidFolds { k: 11, n: 10 })
    );
}

#[test]
fn test_site_folds_keep_time_slices_together() {
    let crs = Crs::epsg(3035);
    let grid = Grid::new("g", 2, 2, GeoTransform::new(0.0, 2.0, 1.0, -1.0), crs.clone())
        .unwrap()
        .with_layer("elev", vec![1.0, 2.0, 3.0, 4.0])
        .unwrap();
    let mut observations = Vec::new();
    for t in 0..3 {
        for (i, (x, y)) in [(0.5, 1.5), (1.5, 1.5), (0.5, 0.5), (1.5, 0.5)].iter().enumerate() {
            observations.push(Observation::numeric(format!("st{}", i), *x, *y, 10.0 + t as f64).at_time(t as f64));
        }
    }
    let result = Assembler::new()
        .covariates(&grid)
        .adapter(Single)
        .build()
        .unwrap()
        .assemble(&ObservationSet::new(crs, observations))
        .unwrap();

    let folds = KFold::new(2).seed(3).split_by_site(&result.matrix).unwrap();
    let rows = result.matrix.rows();
    for fold in &folds {
        for &test in &fold.test {
            assert!(fold.train.iter().all(|&train| rows[train].site != rows[test].site));
        }
    }
    assert_eq!(folds.iter().map(|f| f.test.len()).sum::<usize>(), 12);

    // Only four sites
    assert!(KFold::new(5).split_by_site(&result.matrix).is_err());
}

#[test]
fn test_site_folds_follow_first_seen_site_order() {
    let schema = Schema::new(vec![ColumnSpec::new("zinc", ColumnRole::Target, ColumnKind::Numeric)]).unwrap();
    let rows = ["z", "a", "z", "a", "z"]
        .iter()
        .enumerate()
        .map(|(t, site)| RegressionRow {
            site: site.to_string(),
            time: Some(t as f64),
            values: vec![Value::Numeric(1.0)],
        })
        .collect();
    let matrix = RegressionMatrix::new(schema, rows).unwrap();

    let folds = KFold::new(2).split_by_site(&matrix).unwrap();
    assert_eq!(folds[0].test, [0, 2, 4]);
    assert_eq!(folds[1].test, [1, 3]);

    let train = matrix.subset(&folds[1].train).unwrap();
    assert_eq!(train.nrows(), 3);
    assert!(matrix.subset(&[0, 5]).is_err());
}

// ============================================================================
// Diagnostics Tests
// ============================================================================

#[test]
fn test_diagnostics_hand_computed() {
    let observed = [1.0, 2.0, 3.0, 4.0];
    let predicted = [1.5, 2.0, 2.5, 5.0];

    let d = Diagnostics::compute(&observed, &predicted).unwrap();
    // errors: 0.5, 0, -0.5, 1.0
    assert_eq!(d.n, 4);
    assert_relative_eq!(d.rmse, (1.5f64 / 4.0).sqrt());
    assert_relative_eq!(d.mae, 0.5);
    assert_relative_eq!(d.mean_error, 0.25);
    // SSE 1.5, SST 5.0
    assert_relative_eq!(d.r_squared.unwrap(), 1.0 - 1.5 / 5.0);
    assert!(d.correlation.unwrap() > 0.9);
}

#[test]
fn test_diagnostics_perfect_fit() {
    let observed = [3.0, 1.0, 2.0];
    let d = Diagnostics::compute(&observed, &observed).unwrap();
    assert_relative_eq!(d.rmse, 0.0);
    assert_relative_eq!(d.r_squared.unwrap(), 1.0);
    assert_relative_eq!(d.correlation.unwrap(), 1.0);
}

#[test]
fn test_diagnostics_constant_observations() {
    let d = Diagnostics::compute(&[2.0, 2.0], &[1.0, 3.0]).unwrap();
    assert!(d.r_squared.is_none());
    assert!(d.correlation.is_none());
    assert_relative_eq!(d.mean_error, 0.0);
}

#[test]
fn test_diagnostics_input_errors() {
    let empty: [f64; 0] = [];
    assert_eq!(Diagnostics::compute(&empty, &empty), Err(RfspError::EmptyInput));
    assert_eq!(
        Diagnostics::compute(&[1.0, 2.0], &[1.0]),
        Err(RfspError::MismatchedInputs {
            what: "predictions",
            expected: 2,
            got: 1
        })
    );
}
