//! FILENAME: core/engine/src/session.rs
//! Owned cascading selector state shared by both presentation shells.
//!
//! A `FilterSession` replaces per-shell widget globals with an explicit
//! structure the shell passes into each update, so cascade propagation can
//! be unit-tested without a UI. One session belongs to one logical user;
//! `select` takes `&mut self`, which makes each cascade update a critical
//! section with respect to other updates on the same chain.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::EngineError;
use crate::resolver::resolve_options;
use crate::schema;
use crate::selection::{Selection, ANY};
use crate::source::TabularSource;

/// Display state of a single column selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorState {
    /// The offered values, presentation-ordered, without the `Any` sentinel.
    pub options: Vec<String>,
    /// The current choice; `None` means unconstrained.
    pub selected: Option<String>,
    /// Cascade children stay hidden until their upstream is constrained.
    pub visible: bool,
}

/// The complete selector panel: per-column option lists, selections and
/// visibility, kept consistent with the cascade dependency chain.
#[derive(Debug, Clone)]
pub struct FilterSession {
    selectors: HashMap<String, SelectorState>,
}

impl FilterSession {
    /// Populates every selector unconstrained. Cascade children start
    /// hidden, mirroring the upstream-first selection flow.
    pub fn new(source: &dyn TabularSource) -> Result<Self, EngineError> {
        let mut selectors = HashMap::new();
        for column in schema::COLUMNS {
            let options = resolve_options(source, column, None)?;
            selectors.insert(
                column.to_string(),
                SelectorState {
                    options,
                    selected: None,
                    visible: schema::upstream_of(column).is_none(),
                },
            );
        }
        Ok(FilterSession { selectors })
    }

    /// The state of one selector.
    pub fn selector(&self, column: &str) -> Result<&SelectorState, EngineError> {
        schema::validate_column(column)?;
        self.selectors
            .get(column)
            .ok_or_else(|| EngineError::InvalidColumn(column.to_string()))
    }

    /// The option list as shown to the user: the `Any` sentinel first,
    /// then the resolved values.
    pub fn display_options(&self, column: &str) -> Result<Vec<String>, EngineError> {
        let state = self.selector(column)?;
        let mut options = Vec::with_capacity(state.options.len() + 1);
        options.push(ANY.to_string());
        options.extend(state.options.iter().cloned());
        Ok(options)
    }

    /// Records a selection change at `column` and propagates invalidation
    /// down the cascade chain: every transitive downstream selector gets a
    /// freshly resolved option list, its selection reset to unconstrained,
    /// and is shown only while its immediate upstream is constrained.
    ///
    /// All downstream lists are resolved before the session is touched, so
    /// a failed resolver call leaves the previous valid state intact.
    pub fn select(
        &mut self,
        source: &dyn TabularSource,
        column: &str,
        value: &str,
    ) -> Result<(), EngineError> {
        schema::validate_column(column)?;
        let selected = if value == ANY {
            None
        } else {
            Some(value.to_string())
        };

        let mut updates: Vec<(&'static str, SelectorState)> = Vec::new();
        let mut upstream = column;
        let mut upstream_value = selected.as_deref();
        for dependent in schema::downstream_of(column) {
            let state = match upstream_value {
                Some(v) => SelectorState {
                    options: resolve_options(source, dependent, Some((upstream, v)))?,
                    selected: None,
                    visible: true,
                },
                None => SelectorState {
                    options: resolve_options(source, dependent, None)?,
                    selected: None,
                    visible: false,
                },
            };
            updates.push((dependent, state));
            // Further links see a freshly reset (unconstrained) upstream.
            upstream = dependent;
            upstream_value = None;
        }

        if let Some(state) = self.selectors.get_mut(column) {
            state.selected = selected;
        }
        for (dependent, state) in updates {
            self.selectors.insert(dependent.to_string(), state);
        }
        log::debug!("selector {:?} set to {:?}", column, value);
        Ok(())
    }

    /// The effective filter over all constrained selectors, ready for the
    /// exporter.
    pub fn selection(&self) -> Selection {
        let mut selection = Selection::new();
        for column in schema::COLUMNS {
            if let Some(state) = self.selectors.get(column) {
                if let Some(value) = &state.selected {
                    selection.set(column, value);
                }
            }
        }
        selection
    }
}
