use tabular_cleaning::cleaning::{cap_outliers, check_quality, impute, iqr_bounds, standardize};
use tabular_cleaning::pipeline::run;
use tabular_cleaning::types::{ColumnKind, DataSet, DataType, Field, Schema, Value};
use tabular_cleaning::CleaningError;

fn text(s: &str) -> Value {
    Value::Utf8(s.to_string())
}

/// Small deterministic generator so fixtures vary without a rand dependency.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

/// Mixed dataset with gaps, text numbers, categories and a few extreme values.
fn random_dataset(seed: u64, rows: usize) -> DataSet {
    let mut rng = XorShift(seed.max(1));
    let schema = Schema::new(vec![
        Field::new("qty", DataType::Int64),
        Field::new("weight", DataType::Float64),
        Field::new("amount", DataType::Utf8),
        Field::new("region", DataType::Utf8),
        Field::new("member", DataType::Bool),
    ]);
    let regions = ["north", "south", "east", "west"];

    let rows = (0..rows)
        .map(|_| {
            let qty = match rng.below(20) {
                0 => Value::Null,
                1 => Value::Int64(5_000),
                _ => Value::Int64(rng.below(100) as i64),
            };
            let weight = match rng.below(15) {
                0 => Value::Null,
                1 => Value::Float64(-900.0),
                _ => Value::Float64(rng.below(1_000) as f64 / 10.0),
            };
            let amount = match rng.below(10) {
                0 => Value::Null,
                _ => text(&format!("${},{:03}", rng.below(9) + 1, rng.below(1_000))),
            };
            let region = match rng.below(8) {
                0 => Value::Null,
                n => text(regions[(n % 4) as usize]),
            };
            let member = match rng.below(6) {
                0 => Value::Null,
                n => Value::Bool(n % 2 == 0),
            };
            vec![qty, weight, amount, region, member]
        })
        .collect();

    DataSet::new(schema, rows)
}

#[test]
fn bad_price_stays_text_and_age_gets_median() {
    let schema = Schema::new(vec![
        Field::new("age", DataType::Int64),
        Field::new("price", DataType::Utf8),
    ]);
    let ds = DataSet::new(
        schema,
        vec![
            vec![Value::Int64(30), text("$1,200")],
            vec![Value::Null, text("$;bad")],
            vec![Value::Int64(50), text("$3")],
        ],
    );

    let (cleaned, report) = run(ds).unwrap();

    assert_eq!(cleaned.schema.fields[1].data_type, DataType::Utf8);
    assert_eq!(cleaned.rows[0][1], text("$1,200"));
    assert_eq!(cleaned.rows[1][1], text("$;bad"));
    assert_eq!(cleaned.rows[1][0], Value::Int64(40));
    let initial = report.initial_quality.unwrap();
    assert_eq!(initial.missing_values["age"], 1);
    assert_eq!(initial.missing_values["price"], 0);
    assert_eq!(report.validation.unwrap().missing_values_remaining, 0);
}

#[test]
fn duplicates_are_reported_not_removed_and_outliers_capped() {
    let schema = Schema::new(vec![
        Field::new("value", DataType::Float64),
        Field::new("group", DataType::Utf8),
        Field::new("score", DataType::Float64),
    ]);
    let groups = ["a", "b", "c"];
    let mut rows: Vec<Vec<Value>> = (0..149)
        .map(|i| {
            let value = if [10, 20, 30, 40].contains(&i) {
                10_000.0
            } else {
                i as f64
            };
            vec![
                Value::Float64(value),
                text(groups[i % 3]),
                Value::Float64((i % 7) as f64),
            ]
        })
        .collect();
    rows.push(rows[0].clone());
    let ds = DataSet::new(schema, rows);
    assert_eq!(ds.row_count(), 150);

    let (cleaned, report) = run(ds).unwrap();

    let initial = report.initial_quality.as_ref().unwrap();
    assert_eq!(initial.duplicates, 1);
    assert_eq!(initial.total_rows, 150);
    assert_eq!(initial.missing_values.values().sum::<usize>(), 0);

    let outliers = report.outliers_removed.as_ref().unwrap();
    assert_eq!(outliers.len(), 1);
    assert_eq!(outliers["value"], 4);

    let validation = report.validation.as_ref().unwrap();
    assert_eq!(validation.rows_remaining, 150);
    assert_eq!(validation.duplicates_remaining, 1);
    assert_eq!(validation.data_loss_percentage, 0.0);
    assert_eq!(cleaned.row_count(), 150);

    let json = report.to_json().unwrap();
    assert_eq!(json["initial_quality"]["duplicates"], 1);
    assert_eq!(json["outliers_removed"]["value"], 4);
    assert_eq!(json["validation"]["duplicates_remaining"], 1);
}

#[test]
fn row_count_is_invariant() {
    for seed in 1..20 {
        let ds = random_dataset(seed, 10 + seed as usize * 7);
        let rows = ds.row_count();
        let schema_names: Vec<String> = ds.schema.field_names().map(str::to_owned).collect();

        let (cleaned, report) = run(ds).unwrap();

        assert_eq!(cleaned.row_count(), rows, "seed {seed}");
        let names: Vec<String> = cleaned.schema.field_names().map(str::to_owned).collect();
        assert_eq!(names, schema_names, "seed {seed}");
        assert_eq!(report.validation.unwrap().data_loss_percentage, 0.0);
        assert!(cleaned.check_shape().is_ok());
    }
}

#[test]
fn quality_check_is_pure() {
    let ds = random_dataset(7, 80);
    let before = ds.clone();
    assert_eq!(check_quality(&ds), check_quality(&ds));
    assert_eq!(ds, before);
}

#[test]
fn imputation_leaves_no_missing_values() {
    for seed in 1..10 {
        let mut ds = random_dataset(seed, 60);
        standardize(&mut ds);
        impute(&mut ds);
        for idx in 0..ds.column_count() {
            assert_eq!(ds.missing_count(idx), 0, "seed {seed} column {idx}");
        }
    }
}

#[test]
fn capped_values_lie_within_pre_cap_bounds() {
    for seed in 1..10 {
        let mut ds = random_dataset(seed, 120);
        standardize(&mut ds);
        impute(&mut ds);

        let numeric = ds.schema.indexes_of_kind(ColumnKind::Numeric);
        let bounds: Vec<_> = numeric
            .iter()
            .map(|&idx| iqr_bounds(&ds.numeric_values(idx)).unwrap())
            .collect();

        cap_outliers(&mut ds);

        for (&idx, b) in numeric.iter().zip(&bounds) {
            for v in ds.numeric_values(idx) {
                assert!(v >= b.lower && v <= b.upper, "seed {seed}: {v} outside {b:?}");
            }
        }
    }
}

#[test]
fn capping_is_idempotent() {
    for seed in 1..10 {
        let mut ds = random_dataset(seed, 100);
        standardize(&mut ds);
        impute(&mut ds);

        cap_outliers(&mut ds);
        let once = ds.clone();
        let second = cap_outliers(&mut ds);

        assert!(second.is_empty(), "seed {seed}: {second:?}");
        assert_eq!(ds, once);
    }
}

#[test]
fn coercion_is_all_or_nothing() {
    let mut ds = random_dataset(3, 50);
    let amount = ds.schema.index_of("amount").unwrap();
    standardize(&mut ds);
    assert_eq!(ds.schema.fields[amount].data_type, DataType::Float64);
    assert!(ds.column(amount).all(|v| matches!(v, Value::Float64(_) | Value::Null)));

    let mut ds = random_dataset(3, 50);
    ds.rows[17][amount] = text("about $5");
    let before = ds.rows.iter().map(|r| r[amount].clone()).collect::<Vec<_>>();
    standardize(&mut ds);
    assert_eq!(ds.schema.fields[amount].data_type, DataType::Utf8);
    let after = ds.rows.iter().map(|r| r[amount].clone()).collect::<Vec<_>>();
    assert_eq!(after, before);
}

#[test]
fn dates_are_converted_before_numbers() {
    let schema = Schema::new(vec![Field::new("signup", DataType::Utf8)]);
    let ds = DataSet::new(
        schema,
        vec![
            vec![text("2024-03-01")],
            vec![text("2024-03-02 08:15:00")],
            vec![Value::Null],
        ],
    );

    let (cleaned, report) = run(ds).unwrap();

    assert_eq!(cleaned.schema.fields[0].data_type, DataType::DateTime);
    assert!(matches!(cleaned.rows[0][0], Value::DateTime(_)));
    // Datetime columns are not imputed.
    assert_eq!(cleaned.rows[2][0], Value::Null);
    assert_eq!(report.validation.unwrap().missing_values_remaining, 1);
}

#[test]
fn duplicates_are_assessed_before_coercion() {
    let schema = Schema::new(vec![Field::new("amount", DataType::Utf8)]);
    let ds = DataSet::new(schema, vec![vec![text("$1,000")], vec![text("1000")]]);

    let (cleaned, report) = run(ds).unwrap();

    assert_eq!(report.initial_quality.unwrap().duplicates, 0);
    assert_eq!(cleaned.rows[0][0], cleaned.rows[1][0]);
    assert_eq!(report.validation.unwrap().duplicates_remaining, 1);
}

#[test]
fn empty_dataset_runs_cleanly() {
    let schema = Schema::new(vec![
        Field::new("x", DataType::Float64),
        Field::new("y", DataType::Utf8),
    ]);
    let (cleaned, report) = run(DataSet::new(schema, Vec::new())).unwrap();
    assert_eq!(cleaned.row_count(), 0);
    let initial = report.initial_quality.unwrap();
    assert_eq!(initial.total_rows, 0);
    assert_eq!(initial.duplicates, 0);
    assert!(report.outliers_removed.unwrap().is_empty());
    assert_eq!(report.validation.unwrap().data_loss_percentage, 0.0);
}

#[test]
fn mismatched_value_type_is_fatal() {
    let schema = Schema::new(vec![Field::new("x", DataType::Float64)]);
    let ds = DataSet::new(schema, vec![vec![Value::Float64(1.0)], vec![text("2")]]);
    let err = run(ds).unwrap_err();
    assert!(matches!(
        err,
        CleaningError::TypeMismatch {
            row: 1,
            expected: DataType::Float64,
            found: DataType::Utf8,
            ..
        }
    ));
}
