use rfsp_rs::prelude::*;

fn assembled() -> AssemblyResult<f64> {
    let crs = Crs::epsg(28992);
    let grid = Grid::new("meuse", 2, 2, GeoTransform::new(0.0, 2.0, 1.0, -1.0), crs.clone())
        .unwrap()
        .with_layer("elev", vec![7.9, 8.2, 6.5, 7.1])
        .unwrap();
    let observations = ObservationSet::new(
        crs,
        vec![
            Observation::numeric("1", 0.5, 1.5, 1022.0),
            Observation::numeric("2", 1.5, 0.5, 1141.0),
        ],
    );
    Assembler::new()
        .target("zinc")
        .covariates(&grid)
        .adapter(Stacked)
        .build()
        .unwrap()
        .assemble_sets(&[("zinc", &observations)])
        .unwrap()
}

#[test]
fn test_matrix_json_round_trip() {
    let matrix = assembled().matrix;

    let json = serde_json::to_string(&matrix).unwrap();
    let back: RegressionMatrix<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, matrix);
}

#[test]
fn test_matrix_json_shape() {
    let matrix = assembled().matrix;
    let json = serde_json::to_value(&matrix).unwrap();

    let columns = json["schema"]["columns"].as_array().unwrap();
    let names: Vec<&str> = columns.iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["zinc", "elev", "type"]);
    assert_eq!(columns[0]["role"], "Target");
    assert_eq!(columns[2]["kind"], "Categorical");

    let first = &json["rows"][0];
    assert_eq!(first["site"], "1");
    assert_eq!(first["values"][0]["Numeric"], 1022.0);
    assert_eq!(first["values"][2]["Categorical"], "zinc");
}

#[test]
fn test_model_spec_json() {
    let matrix = assembled().matrix;
    let spec = ModelSpec::from_matrix(&matrix)
        .unwrap()
        .mode(ModelMode::Quantile)
        .seed(1);

    let json = serde_json::to_value(&spec).unwrap();
    assert_eq!(json["target"], "zinc");
    assert_eq!(json["mode"], "Quantile");
    assert_eq!(json["num_trees"], 500);
    assert_eq!(json["covariates"], serde_json::json!(["elev", "type"]));

    let back: ModelSpec<f64> = serde_json::from_value(json).unwrap();
    assert_eq!(back, spec);
}

#[test]
fn test_observations_from_json() {
    let json = r#"{
        "crs": "EPSG:28992",
        "observations": [
            {"site": "1", "location": {"x": 0.5, "y": 1.5}, "time": null, "target": {"Numeric": 1022.0}},
            {"site": "2", "location": {"x": 1.5, "y": 0.5}, "time": 3.0, "target": "Missing"}
        ]
    }"#;

    let set: ObservationSet<f64> = serde_json::from_str(json).unwrap();
    assert_eq!(set.crs, Crs::epsg(28992));
    assert_eq!(set.len(), 2);
    assert_eq!(set.observations[1].time, Some(3.0));
    assert!(set.observations[1].target.is_missing());
}

#[test]
fn test_matrix_json_rejects_short_row() {
    let json = r#"{
        "schema": {"columns": [
            {"name": "zinc", "role": "Target", "kind": "Numeric"},
            {"name": "elev", "role": "Covariate", "kind": "Numeric"}
        ]},
        "rows": [{"site": "1", "time": null, "values": [{"Numeric": 1022.0}]}]
    }"#;

    let err = serde_json::from_str::<RegressionMatrix<f64>>(json).unwrap_err();
    assert!(err.to_string().contains("row has 1 values, schema has 2 columns"));
}

#[test]
fn test_schema_json_rejects_duplicate_target() {
    let json = r#"{"columns": [
        {"name": "zinc", "role": "Target", "kind": "Numeric"},
        {"name": "zinc", "role": "Target", "kind": "Numeric"}
    ]}"#;
    assert!(serde_json::from_str::<Schema>(json).is_err());

    let json = r#"{"columns": [
        {"name": "zinc", "role": "Target", "kind": "Numeric"},
        {"name": "lead", "role": "Target", "kind": "Numeric"}
    ]}"#;
    let err = serde_json::from_str::<Schema>(json).unwrap_err();
    assert!(err.to_string().contains("Column 'lead' appears more than once"));
}
