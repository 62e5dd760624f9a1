//! Query execution and failure isolation.
//!
//! The relational data source stays external to this crate: anything that can
//! resolve a catalog query into a [`ResultTable`] implements [`QuerySource`].
//! The orchestrator runs the catalog in order and isolates per-query failures
//! so one broken query never loses the rest of the report.

use std::collections::BTreeMap;

use tracing::{info, instrument, warn};

use crate::catalog::NamedQuery;
use crate::error::{ReportError, Result};
use crate::model::{QueryResult, ResultTable};

/// A connected relational data source capable of resolving one query into a
/// table. Obtaining the connection is the caller's step and is fatal on
/// failure; errors returned here are recovered per query.
pub trait QuerySource {
    fn run_query(&mut self, name: &str, sql: &str) -> Result<ResultTable>;
}

/// A source backed by pre-materialised tables keyed by query name. Used by
/// the CLI (tables loaded from a JSON document) and by tests. The query text
/// is ignored; a name with no table behaves as a failed query.
#[derive(Debug, Default)]
pub struct StaticSource {
    tables: BTreeMap<String, ResultTable>,
}

impl StaticSource {
    pub fn new(tables: impl IntoIterator<Item = (String, ResultTable)>) -> Self {
        Self {
            tables: tables.into_iter().collect(),
        }
    }
}

impl QuerySource for StaticSource {
    fn run_query(&mut self, name: &str, _sql: &str) -> Result<ResultTable> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| ReportError::Source {
                query: name.to_string(),
                reason: "no table provided for this query".to_string(),
            })
    }
}

/// Executes the catalog in order against the source and collects one
/// [`QueryResult`] per entry. A failure executing a single query is caught
/// and isolated: that entry becomes an empty table with the reason recorded,
/// and execution continues with the remaining queries.
#[instrument(level = "info", skip_all, fields(query_count = queries.len()))]
pub fn run_queries(source: &mut dyn QuerySource, queries: &[NamedQuery]) -> Vec<QueryResult> {
    let mut results = Vec::with_capacity(queries.len());

    for query in queries {
        match source.run_query(query.name, query.sql) {
            Ok(table) => {
                info!(query = query.name, rows = table.row_count(), "query resolved");
                results.push(QueryResult::ok(query.name, table));
            }
            Err(error) => {
                warn!(query = query.name, %error, "query failed, continuing");
                results.push(QueryResult::failed(query.name, error.to_string()));
            }
        }
    }

    results
}
