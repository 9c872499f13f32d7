use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::providers::Provider;

/// One row of a provider billing export, exactly as loaded.
///
/// Every field is optional and unparsed; exports differ per provider (AWS
/// carries `account_id`, GCP carries `project_id`) and tags are frequently
/// missing. Validation and parsing happen in the normalizer, not here.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RawBillingRecord {
    pub date: Option<String>,
    pub account_id: Option<String>,
    pub project_id: Option<String>,
    pub service: Option<String>,
    pub team: Option<String>,
    pub env: Option<String>,
    pub cost_usd: Option<String>,
}

/// Canonical billing record shared by every provider.
///
/// Constructed once by the normalizer and never mutated afterwards; every
/// field is present and non-null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedBillingRecord {
    pub date: NaiveDate,
    pub provider: Provider,
    /// Provider account/project under which the cost was incurred.
    pub billing_entity: String,
    /// Provider-local service name. Names are NOT comparable across
    /// providers without a separate mapping table.
    pub service: String,
    pub team: String,
    pub env: String,
    /// Signed dollars; negative values are credits/refunds.
    pub cost: f64,
}
