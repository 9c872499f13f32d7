use chrono::NaiveDate;
use thiserror::Error;

use crate::core::models::billing::{RawBillingRecord, UnifiedBillingRecord};
use crate::core::providers::{self, Provider};

/// Sentinel for records carrying no team tag.
pub const UNASSIGNED_TEAM: &str = "Unassigned";
/// Sentinel for records carrying no environment tag.
pub const UNKNOWN_ENV: &str = "Unknown";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("record {index}: missing or unparsable field '{field}'")]
    MalformedRecord { index: usize, field: &'static str },
    #[error("no entity mapping for provider '{0}'")]
    UnknownProvider(String),
}

/// Normalize a single raw export row into the canonical record shape.
///
/// `index` is the row's position in the source batch and is carried into
/// errors so the caller can report, skip, or abort on that specific row.
/// Date must parse as `%Y-%m-%d` and cost as a float; the billing entity is
/// taken from the provider's mapped source column. A bad row yields
/// `MalformedRecord` naming the offending field, never a silent drop.
pub fn normalize_record(
    raw: &RawBillingRecord,
    provider: Provider,
    index: usize,
) -> Result<UnifiedBillingRecord, NormalizeError> {
    let mapping = providers::entity_mapping(provider)
        .ok_or_else(|| NormalizeError::UnknownProvider(provider.id().to_string()))?;

    let date = non_empty(&raw.date)
        .and_then(|v| NaiveDate::parse_from_str(v, DATE_FORMAT).ok())
        .ok_or(NormalizeError::MalformedRecord {
            index,
            field: "date",
        })?;

    let cost: f64 = non_empty(&raw.cost_usd)
        .and_then(|v| v.parse().ok())
        .ok_or(NormalizeError::MalformedRecord {
            index,
            field: "cost_usd",
        })?;

    let billing_entity = entity_value(raw, mapping.source_field).ok_or(
        NormalizeError::MalformedRecord {
            index,
            field: mapping.source_field,
        },
    )?;

    // Service names pass through untouched. Cross-provider reconciliation
    // (e.g. GCP exports containing AWS-style names) is a separate mapping
    // concern owned by the caller.
    let service = non_empty(&raw.service).ok_or(NormalizeError::MalformedRecord {
        index,
        field: "service",
    })?;

    Ok(UnifiedBillingRecord {
        date,
        provider,
        billing_entity: billing_entity.to_string(),
        service: service.to_string(),
        team: coalesce(&raw.team, UNASSIGNED_TEAM),
        env: coalesce(&raw.env, UNKNOWN_ENV),
        cost,
    })
}

/// Normalize a whole batch, stopping at the first bad record.
///
/// Output order matches input order, so concatenating per-provider batches
/// is equivalent to normalizing a merged input in provider-then-row order.
/// Callers wanting skip-and-continue semantics iterate `normalize_record`
/// themselves.
pub fn normalize(
    records: &[RawBillingRecord],
    provider: Provider,
) -> Result<Vec<UnifiedBillingRecord>, NormalizeError> {
    providers::entity_mapping(provider)
        .ok_or_else(|| NormalizeError::UnknownProvider(provider.id().to_string()))?;
    records
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_record(raw, provider, index))
        .collect()
}

/// Treat empty and whitespace-only values as absent.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn coalesce(value: &Option<String>, default: &str) -> String {
    non_empty(value).unwrap_or(default).to_string()
}

/// Resolve a mapped source field name against a raw record.
fn entity_value<'a>(raw: &'a RawBillingRecord, field: &str) -> Option<&'a str> {
    match field {
        "account_id" => non_empty(&raw.account_id),
        "project_id" => non_empty(&raw.project_id),
        _ => None,
    }
}
