//! FILENAME: app/tests/web_api.rs
//! Shell-level tests: handlers called directly with extractor values, over
//! a real database file plus an artifact directory, both throwaway.

use axum::extract::State;
use axum::Json;
use rusqlite::Connection;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;

use app::handlers::{self, OptionsRequest};
use app::{create_app_state, AppState};
use engine::schema;

struct TestShell {
    state: Arc<AppState>,
    // Held for their Drop cleanup.
    _db_dir: TempDir,
    _export_dir: TempDir,
}

impl TestShell {
    fn new() -> Self {
        let db_dir = TempDir::new().unwrap();
        let export_dir = TempDir::new().unwrap();
        let db_path = db_dir.path().join("merged_data.db");

        let conn = Connection::open(&db_path).unwrap();
        conn.execute_batch(&format!(
            r#"
            CREATE TABLE "{table}" (
                "Vehicle Manufacturer" TEXT,
                "Make" TEXT,
                "Model-full" TEXT,
                "Technology" TEXT,
                "Model Year" INTEGER,
                "Vehicle Category" TEXT,
                "Vehicle Use Case" TEXT,
                "Vehicle Class" TEXT,
                "Zip Code" TEXT
            );
            INSERT INTO "{table}" VALUES
                ('Acme', 'A1', 'A1 Alpha', 'BEV', 2020, 'Passenger', 'Personal', 'Class 1', '90210'),
                ('Acme', 'A2', 'A2 Alpha', 'PHEV', 2021, 'Truck', 'Commercial', 'Class 2', '10001'),
                ('Zenith', 'Z1', 'Z1 Alpha', 'BEV', 2020, 'Passenger', 'Personal', 'Class 1', '60601');
            "#,
            table = schema::TABLE
        ))
        .unwrap();

        let state = create_app_state(db_path, export_dir.path().to_path_buf());
        TestShell {
            state,
            _db_dir: db_dir,
            _export_dir: export_dir,
        }
    }

    fn exported_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.state.export_dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

#[tokio::test]
async fn test_index_lists_manufacturers() {
    let shell = TestShell::new();
    let Json(response) = handlers::index(State(shell.state.clone())).await;

    assert!(response.success);
    assert_eq!(response.options, vec!["Acme", "Zenith"]);
}

#[tokio::test]
async fn test_fetch_options_unconstrained() {
    let shell = TestShell::new();
    let request = OptionsRequest {
        column: schema::MAKE.to_string(),
        filter_column: None,
        filter_value: None,
    };
    let Json(response) =
        handlers::fetch_options(State(shell.state.clone()), Json(request)).await;

    assert!(response.success);
    assert_eq!(response.options, vec!["A1", "A2", "Z1"]);
}

#[tokio::test]
async fn test_fetch_options_constrained() {
    let shell = TestShell::new();
    let request = OptionsRequest {
        column: schema::MAKE.to_string(),
        filter_column: Some(schema::MANUFACTURER.to_string()),
        filter_value: Some("Acme".to_string()),
    };
    let Json(response) =
        handlers::fetch_options(State(shell.state.clone()), Json(request)).await;

    assert!(response.success);
    assert_eq!(response.options, vec!["A1", "A2"]);
}

#[tokio::test]
async fn test_fetch_options_half_constraint_is_ignored() {
    let shell = TestShell::new();
    let request = OptionsRequest {
        column: schema::MAKE.to_string(),
        filter_column: Some(schema::MANUFACTURER.to_string()),
        filter_value: None,
    };
    let Json(response) =
        handlers::fetch_options(State(shell.state.clone()), Json(request)).await;

    assert!(response.success);
    assert_eq!(response.options, vec!["A1", "A2", "Z1"]);
}

#[tokio::test]
async fn test_fetch_options_unknown_column_is_reported() {
    let shell = TestShell::new();
    let request = OptionsRequest {
        column: "Colour".to_string(),
        filter_column: None,
        filter_value: None,
    };
    let Json(response) =
        handlers::fetch_options(State(shell.state.clone()), Json(request)).await;

    assert!(!response.success);
    assert!(response.options.is_empty());
    assert!(response.error.unwrap().contains("Colour"));
}

#[tokio::test]
async fn test_export_ignores_any_sentinels() {
    let shell = TestShell::new();
    let mut selections = HashMap::new();
    selections.insert(schema::MANUFACTURER.to_string(), "Acme".to_string());
    selections.insert(schema::MAKE.to_string(), "Any".to_string());
    selections.insert(schema::TECHNOLOGY.to_string(), "BEV".to_string());

    let Json(response) = handlers::export(State(shell.state.clone()), Json(selections)).await;

    assert!(response.success, "{}", response.message);
    assert_eq!(response.rows, Some(1));
    let file = response.file.unwrap();
    assert!(response.message.contains(&file));
    assert_eq!(shell.exported_files(), vec![file]);
}

#[tokio::test]
async fn test_export_empty_selection_exports_whole_table() {
    let shell = TestShell::new();
    let Json(response) =
        handlers::export(State(shell.state.clone()), Json(HashMap::new())).await;

    assert!(response.success);
    assert_eq!(response.rows, Some(3));
}

#[tokio::test]
async fn test_export_invalid_column_reports_and_writes_nothing() {
    let shell = TestShell::new();
    let mut selections = HashMap::new();
    selections.insert("VIN".to_string(), "5YJ3".to_string());

    let Json(response) = handlers::export(State(shell.state.clone()), Json(selections)).await;

    assert!(!response.success);
    assert!(response.message.starts_with("Error during export:"));
    assert!(response.file.is_none());
    assert!(shell.exported_files().is_empty());
}

#[tokio::test]
async fn test_response_json_omits_absent_fields() {
    let shell = TestShell::new();

    let Json(response) = handlers::index(State(shell.state.clone())).await;
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["success"], serde_json::json!(true));
    assert!(value.get("error").is_none());

    let mut selections = HashMap::new();
    selections.insert("VIN".to_string(), "5YJ3".to_string());
    let Json(response) = handlers::export(State(shell.state.clone()), Json(selections)).await;
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["success"], serde_json::json!(false));
    assert!(value.get("file").is_none());
    assert!(value.get("rows").is_none());
    assert!(value["error"].as_str().unwrap().contains("VIN"));
}

#[tokio::test]
async fn test_missing_database_is_reported_not_fatal() {
    let shell = TestShell::new();
    std::fs::remove_file(shell.state.db_path.clone()).unwrap();

    let request = OptionsRequest {
        column: schema::MAKE.to_string(),
        filter_column: None,
        filter_value: None,
    };
    let Json(response) =
        handlers::fetch_options(State(shell.state.clone()), Json(request)).await;
    assert!(!response.success);
    assert!(response.error.is_some());
}
