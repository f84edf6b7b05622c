use csv::ReaderBuilder;
use gini_tree::data::dataset::Dataset;
use gini_tree::metrics::confusion::ClassificationMetrics;
use gini_tree::trees::classifier::DecisionTreeClassifier;
use gini_tree::trees::params::DEFAULT_MAX_DEPTH;
use gini_tree::{Result, TreeError};
use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;
use std::env;

struct LabeledData {
    dataset: Dataset<f64, u32>,
    feature_names: Vec<String>,
    class_names: HashMap<u32, String>,
}

/// Reads a headed CSV whose last column is the class label.
///
/// Labels get ids in order of first appearance.
fn read_file_classification(file_path: &str) -> Result<LabeledData> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(file_path)?;
    let headers = reader.headers()?.clone();
    let dimension = headers
        .len()
        .checked_sub(1)
        .filter(|&dimension| dimension > 0)
        .ok_or_else(|| {
            TreeError::InvalidInput("Expected feature columns and a label column".into())
        })?;
    let feature_names = headers
        .iter()
        .take(dimension)
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut label_map: HashMap<String, u32> = HashMap::new();

    for result in reader.records() {
        let record = result?;

        for feature in record.iter().take(dimension) {
            let value = feature.trim().parse::<f64>().map_err(|err| {
                TreeError::InvalidInput(format!("Bad feature value '{}': {}", feature, err))
            })?;
            features.push(value);
        }

        let label = record
            .get(dimension)
            .ok_or_else(|| TreeError::InvalidInput("Missing label".into()))?;
        let next_id = label_map.len() as u32;
        let label_id = *label_map.entry(label.trim().to_string()).or_insert(next_id);
        labels.push(label_id);
    }

    let feature_matrix = DMatrix::from_row_slice(labels.len(), dimension, &features);
    let class_names = label_map.into_iter().map(|(name, id)| (id, name)).collect();

    Ok(LabeledData {
        dataset: Dataset::new(feature_matrix, DVector::from_vec(labels)),
        feature_names,
        class_names,
    })
}

fn run(file_path: &str, max_depth: u16) -> Result<String> {
    let data = read_file_classification(file_path)?;
    println!(
        "Loaded {} rows with {} features",
        data.dataset.nrows(),
        data.dataset.ncols()
    );

    let (train_dataset, test_dataset) = data.dataset.train_test_split(0.75, Some(42))?;

    let mut classifier = DecisionTreeClassifier::with_params(max_depth);
    classifier.fit(&train_dataset)?;
    classifier.print_tree(&data.feature_names, &data.class_names)?;

    if test_dataset.nrows() == 0 {
        return Ok("No rows left for testing.".to_string());
    }
    let predictions = classifier.predict(&test_dataset.x)?;
    let accuracy = classifier.accuracy(&test_dataset.y, &predictions)?;
    Ok(format!("Accuracy: {}%", accuracy * 100.0))
}

fn main() {
    let args = env::args().collect::<Vec<_>>();
    let Some(file_path) = args.get(1) else {
        eprintln!("usage: tree-demo <dataset.csv> [max_depth]");
        std::process::exit(2);
    };
    let max_depth = match args.get(2).map(|depth| depth.parse::<u16>()) {
        None => DEFAULT_MAX_DEPTH,
        Some(Ok(depth)) => depth,
        Some(Err(err)) => {
            eprintln!("max_depth must be a non-negative integer: {}", err);
            std::process::exit(2);
        }
    };

    match run(file_path, max_depth) {
        Ok(summary) => println!("{}", summary),
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
