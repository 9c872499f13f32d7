use crate::core::models::billing::RawBillingRecord;
use crate::core::models::profile::{ColumnNulls, SourceProfile};
use crate::core::providers::{self, Provider};

/// Count rows and per-column nulls in one raw export.
///
/// Empty and whitespace-only values count as null, matching the
/// normalizer's coalescing rules. Only the entity column relevant to the
/// provider is reported; the other provider's column would be 100% null by
/// construction.
pub fn profile(records: &[RawBillingRecord], provider: Provider) -> SourceProfile {
    let entity_field = providers::entity_mapping(provider)
        .map(|m| m.source_field)
        .unwrap_or("billing_entity");

    let columns: Vec<(&'static str, fn(&RawBillingRecord) -> &Option<String>)> = vec![
        ("date", |r| &r.date),
        ("account_id", |r| &r.account_id),
        ("project_id", |r| &r.project_id),
        ("service", |r| &r.service),
        ("team", |r| &r.team),
        ("env", |r| &r.env),
        ("cost_usd", |r| &r.cost_usd),
    ];

    let null_counts = columns
        .into_iter()
        .filter(|(name, _)| !name.ends_with("_id") || *name == entity_field)
        .map(|(name, get)| ColumnNulls {
            column: name,
            nulls: records
                .iter()
                .filter(|r| get(r).as_deref().map_or(true, |v| v.trim().is_empty()))
                .count(),
        })
        .collect();

    SourceProfile {
        provider,
        rows: records.len(),
        null_counts,
    }
}
