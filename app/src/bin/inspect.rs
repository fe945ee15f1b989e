//! FILENAME: app/src/bin/inspect.rs
//! Prints every table's columns and first rows, for eyeballing a database
//! before pointing the filter shell at it.

use datasource::SqliteSource;
use engine::EngineError;

const PREVIEW_ROWS: u32 = 10;

fn main() {
    env_logger::init();
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "merged_data.db".to_string());

    if let Err(err) = run(&db_path) {
        eprintln!("inspect failed: {}", err);
        std::process::exit(1);
    }
}

fn run(db_path: &str) -> Result<(), EngineError> {
    let source = SqliteSource::open(db_path)?;
    for table in source.table_names()? {
        let columns = source.table_columns(&table)?;
        println!();
        println!("Data from table '{}':", table);
        println!("{}", columns.join(" | "));

        let preview = source.preview(&table, PREVIEW_ROWS)?;
        for row in &preview.rows {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            println!("{}", cells.join(" | "));
        }
    }
    Ok(())
}
