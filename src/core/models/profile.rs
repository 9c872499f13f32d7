use serde::Serialize;

use crate::core::providers::Provider;

#[derive(Debug, Clone, Serialize)]
pub struct ColumnNulls {
    pub column: &'static str,
    pub nulls: usize,
}

/// Row and null-count profile of one raw export.
#[derive(Debug, Clone, Serialize)]
pub struct SourceProfile {
    pub provider: Provider,
    pub rows: usize,
    pub null_counts: Vec<ColumnNulls>,
}
