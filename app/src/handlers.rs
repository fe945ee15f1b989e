//! FILENAME: app/src/handlers.rs
//! Endpoint handlers. Every response is structured JSON with a `success`
//! flag; failures are rendered as messages, never as a crash or a bare
//! status code.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use datasource::SqliteSource;
use engine::{resolve_options, schema, EngineError, Selection};
use persistence::{export_selection, ExportError, ExportReceipt};

use crate::AppState;

// ============================================================================
// OPTION RESOLUTION
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct OptionsRequest {
    pub column: String,
    #[serde(default)]
    pub filter_column: Option<String>,
    #[serde(default)]
    pub filter_value: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub success: bool,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OptionsResponse {
    fn ok(options: Vec<String>) -> Self {
        OptionsResponse {
            success: true,
            options,
            error: None,
        }
    }

    fn fail(err: &EngineError) -> Self {
        OptionsResponse {
            success: false,
            options: Vec::new(),
            error: Some(err.to_string()),
        }
    }
}

/// Initial page data: the unconstrained manufacturer list.
pub async fn index(State(state): State<Arc<AppState>>) -> Json<OptionsResponse> {
    let result: Result<Vec<String>, EngineError> = (|| {
        let source = SqliteSource::open(&state.db_path)?;
        resolve_options(&source, schema::MANUFACTURER, None)
    })();

    Json(match result {
        Ok(options) => OptionsResponse::ok(options),
        Err(err) => {
            log::error!("index options failed: {}", err);
            OptionsResponse::fail(&err)
        }
    })
}

/// Options for one column, optionally constrained by an upstream selector.
/// The constraint applies only when both halves are present.
pub async fn fetch_options(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OptionsRequest>,
) -> Json<OptionsResponse> {
    let result: Result<Vec<String>, EngineError> = (|| {
        let source = SqliteSource::open(&state.db_path)?;
        let constraint = match (
            request.filter_column.as_deref(),
            request.filter_value.as_deref(),
        ) {
            (Some(column), Some(value)) => Some((column, value)),
            _ => None,
        };
        resolve_options(&source, &request.column, constraint)
    })();

    Json(match result {
        Ok(options) => OptionsResponse::ok(options),
        Err(err) => {
            log::error!("fetch_options for {:?} failed: {}", request.column, err);
            OptionsResponse::fail(&err)
        }
    })
}

// ============================================================================
// EXPORT
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Exports the rows matching the submitted selections. Entries carrying
/// the `Any` sentinel are ignored; an empty map exports the whole table.
pub async fn export(
    State(state): State<Arc<AppState>>,
    Json(selections): Json<HashMap<String, String>>,
) -> Json<ExportResponse> {
    let selection =
        Selection::from_pairs(selections.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    let result: Result<ExportReceipt, ExportError> = (|| {
        let source = SqliteSource::open(&state.db_path)?;
        export_selection(&source, &selection, &state.export_dir)
    })();

    Json(match result {
        Ok(receipt) => ExportResponse {
            success: true,
            message: format!("Data exported to '{}'.", receipt.file_name()),
            file: Some(receipt.file_name()),
            rows: Some(receipt.row_count),
            error: None,
        },
        Err(err) => {
            log::error!("export failed: {}", err);
            ExportResponse {
                success: false,
                message: format!("Error during export: {}", err),
                file: None,
                rows: None,
                error: Some(err.to_string()),
            }
        }
    })
}
