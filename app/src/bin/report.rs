//! FILENAME: app/src/bin/report.rs
//! Aggregate count summaries over the registration table: the series behind
//! the pie (technology share), bar (vehicles by make) and stacked-bar
//! (model growth over time) charts, printed as plain text tables.

use datasource::SqliteSource;
use engine::{pivot_counts, schema, value_counts, EngineError};

fn main() {
    env_logger::init();
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "merged_data.db".to_string());

    if let Err(err) = run(&db_path) {
        eprintln!("report failed: {}", err);
        std::process::exit(1);
    }
}

fn run(db_path: &str) -> Result<(), EngineError> {
    let source = SqliteSource::open(db_path)?;

    println!("Distribution of Technologies");
    let technologies = value_counts(&source, schema::TECHNOLOGY)?;
    let total: u64 = technologies.iter().map(|e| e.count).sum();
    for entry in &technologies {
        let share = if total > 0 {
            100.0 * entry.count as f64 / total as f64
        } else {
            0.0
        };
        println!("{:>8}  {:>5.1}%  {}", entry.count, share, entry.label);
    }

    println!();
    println!("Count of Vehicles by Make");
    for entry in value_counts(&source, schema::MAKE)? {
        println!("{:>8}  {}", entry.count, entry.label);
    }

    println!();
    println!("Vehicle Growth by Model Year");
    let pivot = pivot_counts(&source, schema::MODEL_YEAR, schema::MAKE)?;
    println!("{:>12}  {}", "Model Year", pivot.col_labels.join("  "));
    for (r, year) in pivot.row_labels.iter().enumerate() {
        let cells: Vec<String> = pivot
            .col_labels
            .iter()
            .enumerate()
            .map(|(c, label)| format!("{:>width$}", pivot.counts[r][c], width = label.len()))
            .collect();
        println!("{:>12}  {}", year, cells.join("  "));
    }

    Ok(())
}
