use approx::assert_relative_eq;
use rfsp_rs::prelude::*;

// ============================================================================
// Test Engine
// ============================================================================

/// Predicts the weighted mean target everywhere; enough to exercise the seam.
struct MeanEngine;

#[derive(Debug, PartialEq)]
enum MeanEngineError {
    Unsupported(ModelMode),
    MissingLayer(String),
}

struct MeanModel {
    mean: f64,
    covariates: Vec<String>,
    quantiles: Vec<f64>,
}

impl RegressionEngine<f64> for MeanEngine {
    type Model = MeanModel;
    type Error = MeanEngineError;

    fn fit(&self, matrix: &RegressionMatrix<f64>, spec: &ModelSpec<f64>) -> Result<MeanModel, MeanEngineError> {
        if spec.mode.target_kind() != ColumnKind::Numeric {
            return Err(MeanEngineError::Unsupported(spec.mode));
        }
        let y = matrix.numeric_column(&spec.target).unwrap();
        let w = match &spec.weight {
            Some(name) => matrix.numeric_column(name).unwrap(),
            None => vec![1.0; y.len()],
        };
        let total: f64 = w.iter().sum();
        let mean = y.iter().zip(&w).map(|(y, w)| y * w).sum::<f64>() / total;
        Ok(MeanModel {
            mean,
            covariates: spec.covariates.clone(),
            quantiles: spec.quantiles.clone(),
        })
    }

    fn predict(
        &self,
        model: &MeanModel,
        grid: &Grid<f64>,
        mode: PredictionMode,
    ) -> Result<Vec<Layer<f64>>, MeanEngineError> {
        for name in &model.covariates {
            if grid.layer(name).is_none() {
                return Err(MeanEngineError::MissingLayer(name.clone()));
            }
        }
        let layer = |name: String| Layer::new(name, vec![model.mean; grid.cell_count()]);
        Ok(match mode {
            PredictionMode::Point => vec![layer("pred".to_string())],
            PredictionMode::Quantile => model
                .quantiles
                .iter()
                .map(|q| layer(format!("q{}", q)))
                .collect(),
            PredictionMode::Probability => return Err(MeanEngineError::Unsupported(ModelMode::Probability)),
        })
    }
}

fn fixture() -> (Grid<f64>, ObservationSet<f64>) {
    let crs = Crs::epsg(28992);
    let grid = Grid::new("meuse", 2, 2, GeoTransform::new(0.0, 2.0, 1.0, -1.0), crs.clone())
        .unwrap()
        .with_layer("elev", vec![7.9, 8.2, 6.5, 7.1])
        .unwrap();
    let observations = ObservationSet::new(
        crs,
        vec![
            Observation::numeric("1", 0.5, 1.5, 10.0),
            Observation::numeric("2", 1.5, 0.5, 20.0),
        ],
    );
    (grid, observations)
}

// ============================================================================
// Fit and Predict
// ============================================================================

#[test]
fn test_fit_and_predict_onto_grid_with_distances() {
    let (grid, observations) = fixture();
    let distances = BufferDistance::new()
        .build()
        .unwrap()
        .generate_for_sites(&observations, &grid)
        .unwrap();
    let result = Assembler::new()
        .target("zinc")
        .covariates(&grid)
        .distances(&distances)
        .adapter(Single)
        .build()
        .unwrap()
        .assemble_weighted(&observations, &[3.0, 1.0])
        .unwrap();

    let spec = ModelSpec::from_matrix(&result.matrix).unwrap().num_trees(150).seed(1);
    spec.validate_against(result.matrix.schema()).unwrap();
    assert_eq!(spec.covariates, ["elev", "layer.1", "layer.2"]);
    assert_eq!(spec.weight.as_deref(), Some("weight"));

    let model = MeanEngine.fit(&result.matrix, &spec).unwrap();
    assert_relative_eq!(model.mean, 12.5);

    // The prediction grid carries covariates and distances under matching names
    let prediction_grid = grid.clone().with_distance_layers(&distances).unwrap();
    let layers = MeanEngine
        .predict(&model, &prediction_grid, spec.prediction_mode())
        .unwrap();
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].values.len(), 4);

    // Without the distance layers the engine cannot predict
    let err = MeanEngine.predict(&model, &grid, PredictionMode::Point).unwrap_err();
    assert_eq!(err, MeanEngineError::MissingLayer("layer.1".to_string()));
}

#[test]
fn test_quantile_mode_yields_one_layer_per_quantile() {
    let (grid, observations) = fixture();
    let result = Assembler::new()
        .covariates(&grid)
        .adapter(Single)
        .build()
        .unwrap()
        .assemble(&observations)
        .unwrap();

    let spec = ModelSpec::from_matrix(&result.matrix).unwrap().mode(ModelMode::Quantile);
    assert_eq!(spec.prediction_mode(), PredictionMode::Quantile);

    let model = MeanEngine.fit(&result.matrix, &spec).unwrap();
    let layers = MeanEngine.predict(&model, &grid, spec.prediction_mode()).unwrap();
    assert_eq!(layers.len(), 3);
}

#[test]
fn test_engine_errors_pass_through_unchanged() {
    let (grid, observations) = fixture();
    let result = Assembler::new()
        .covariates(&grid)
        .adapter(Single)
        .build()
        .unwrap()
        .assemble(&observations)
        .unwrap();

    let spec = ModelSpec::from_matrix(&result.matrix).unwrap().mode(ModelMode::Probability);
    let err = MeanEngine.fit(&result.matrix, &spec).err();
    assert_eq!(err, Some(MeanEngineError::Unsupported(ModelMode::Probability)));
}

// ============================================================================
// Specification Checks
// ============================================================================

#[test]
fn test_spec_rejects_unknown_columns() {
    let (grid, observations) = fixture();
    let result = Assembler::new()
        .covariates(&grid)
        .adapter(Single)
        .build()
        .unwrap()
        .assemble(&observations)
        .unwrap();

    let spec: ModelSpec<f64> = ModelSpec::new("target", ["elev", "slope"]);
    assert_eq!(
        spec.validate_against(result.matrix.schema()),
        Err(RfspError::UnknownColumn("slope".to_string()))
    );
}

#[test]
fn test_classification_requires_categorical_target() {
    let (grid, observations) = fixture();
    let result = Assembler::new()
        .covariates(&grid)
        .adapter(Single)
        .build()
        .unwrap()
        .assemble(&observations)
        .unwrap();

    let spec: ModelSpec<f64> = ModelSpec::new("target", ["elev"]).mode(ModelMode::Classification);
    assert!(matches!(
        spec.validate_against(result.matrix.schema()),
        Err(RfspError::InvalidModelSpec(_))
    ));
}

#[test]
fn test_categorical_matrix_defaults_to_classification() {
    let (grid, _) = fixture();
    let observations = ObservationSet::new(
        Crs::epsg(28992),
        vec![
            Observation::categorical("1", 0.5, 1.5, "Ah"),
            Observation::categorical("2", 1.5, 0.5, "Fm"),
        ],
    );
    let result = Assembler::new()
        .target("soil")
        .covariates(&grid)
        .adapter(Single)
        .build()
        .unwrap()
        .assemble(&observations)
        .unwrap();

    let spec = ModelSpec::from_matrix(&result.matrix).unwrap();
    assert_eq!(spec.mode, ModelMode::Classification);
    spec.validate_against(result.matrix.schema()).unwrap();

    let probability = spec.mode(ModelMode::Probability);
    assert_eq!(probability.prediction_mode(), PredictionMode::Probability);
    probability.validate_against(result.matrix.schema()).unwrap();
}
