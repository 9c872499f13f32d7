use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::models::billing::UnifiedBillingRecord;
use crate::core::models::summary::{MonthlySpend, ProviderSpend, ServiceSpend, SpendSummary};
use crate::core::providers::Provider;

/// Dimension a spend aggregation can group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Date,
    Month,
    Provider,
    BillingEntity,
    Service,
    Team,
    Env,
}

impl GroupKey {
    pub fn from_id(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "date" => Some(Self::Date),
            "month" => Some(Self::Month),
            "provider" => Some(Self::Provider),
            "billing_entity" | "entity" => Some(Self::BillingEntity),
            "service" => Some(Self::Service),
            "team" => Some(Self::Team),
            "env" => Some(Self::Env),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Month => "month",
            Self::Provider => "provider",
            Self::BillingEntity => "billing_entity",
            Self::Service => "service",
            Self::Team => "team",
            Self::Env => "env",
        }
    }

    fn extract(&self, record: &UnifiedBillingRecord) -> String {
        match self {
            Self::Date => record.date.format("%Y-%m-%d").to_string(),
            Self::Month => record.date.format("%Y-%m").to_string(),
            Self::Provider => record.provider.id().to_string(),
            Self::BillingEntity => record.billing_entity.clone(),
            Self::Service => record.service.clone(),
            Self::Team => record.team.clone(),
            Self::Env => record.env.clone(),
        }
    }
}

/// Sum signed cost per distinct combination of `keys` values.
///
/// Groups whose credits fully offset their charges stay present with a zero
/// total rather than disappearing. An empty input yields an empty map.
pub fn aggregate(
    records: &[UnifiedBillingRecord],
    keys: &[GroupKey],
) -> BTreeMap<Vec<String>, f64> {
    let mut totals: BTreeMap<Vec<String>, f64> = BTreeMap::new();
    for record in records {
        let key: Vec<String> = keys.iter().map(|k| k.extract(record)).collect();
        *totals.entry(key).or_insert(0.0) += record.cost;
    }
    totals
}

/// The `n` groups with the highest summed cost, ties broken by lexical key
/// order. Deterministic regardless of input order.
pub fn top_n(totals: &BTreeMap<Vec<String>, f64>, n: usize) -> Vec<(Vec<String>, f64)> {
    let mut entries: Vec<(Vec<String>, f64)> =
        totals.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    entries.truncate(n);
    entries
}

/// Build the standard spend report: provider totals, a month-by-provider
/// table (newest month first) and the `top` most expensive services.
pub fn build_summary(records: &[UnifiedBillingRecord], top: usize) -> SpendSummary {
    let total_cost: f64 = records.iter().map(|r| r.cost).sum();
    let usage_cost: f64 = records.iter().map(|r| r.cost).filter(|c| *c > 0.0).sum();
    let credit_total: f64 = records.iter().map(|r| r.cost).filter(|c| *c < 0.0).sum();

    let by_provider: Vec<ProviderSpend> = Provider::all()
        .iter()
        .filter_map(|provider| {
            let rows: Vec<&UnifiedBillingRecord> =
                records.iter().filter(|r| r.provider == *provider).collect();
            if rows.is_empty() {
                return None;
            }
            Some(ProviderSpend {
                provider: *provider,
                records: rows.len(),
                total_cost: rows.iter().map(|r| r.cost).sum(),
            })
        })
        .collect();

    let mut month_totals: BTreeMap<(String, Provider), f64> = BTreeMap::new();
    for record in records {
        let month = record.date.format("%Y-%m").to_string();
        *month_totals.entry((month, record.provider)).or_insert(0.0) += record.cost;
    }
    let mut monthly: Vec<MonthlySpend> = month_totals
        .into_iter()
        .map(|((month, provider), total_cost)| MonthlySpend {
            month,
            provider,
            total_cost,
        })
        .collect();
    // Newest month first, providers alphabetical within a month.
    monthly.sort_by(|a, b| b.month.cmp(&a.month).then_with(|| a.provider.cmp(&b.provider)));

    let top_services: Vec<ServiceSpend> = top_n(&aggregate(records, &[GroupKey::Service]), top)
        .into_iter()
        .map(|(key, total_cost)| ServiceSpend {
            service: key.into_iter().next().unwrap_or_default(),
            total_cost,
        })
        .collect();

    SpendSummary {
        records: records.len(),
        total_cost,
        usage_cost,
        credit_total,
        by_provider,
        monthly,
        top_services,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: &str, provider: Provider, service: &str, cost: f64) -> UnifiedBillingRecord {
        UnifiedBillingRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            provider,
            billing_entity: "acct".to_string(),
            service: service.to_string(),
            team: "Data".to_string(),
            env: "dev".to_string(),
            cost,
        }
    }

    #[test]
    fn group_key_ids_round_trip() {
        for key in [
            GroupKey::Date,
            GroupKey::Month,
            GroupKey::Provider,
            GroupKey::BillingEntity,
            GroupKey::Service,
            GroupKey::Team,
            GroupKey::Env,
        ] {
            assert_eq!(GroupKey::from_id(key.id()), Some(key));
        }
        assert_eq!(GroupKey::from_id("entity"), Some(GroupKey::BillingEntity));
        assert!(GroupKey::from_id("region").is_none());
    }

    #[test]
    fn aggregate_sums_per_group() {
        let records = vec![
            record("2025-12-01", Provider::Aws, "EC2", 10.0),
            record("2025-12-02", Provider::Aws, "EC2", 5.0),
            record("2025-12-02", Provider::Aws, "S3", 2.0),
        ];
        let totals = aggregate(&records, &[GroupKey::Service]);
        assert_eq!(totals.len(), 2);
        assert!((totals[&vec!["EC2".to_string()]] - 15.0).abs() < 1e-9);
        assert!((totals[&vec!["S3".to_string()]] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn aggregate_conserves_total_cost_with_credits() {
        let records = vec![
            record("2025-12-01", Provider::Aws, "EC2", 10.0),
            record("2025-12-01", Provider::Gcp, "BigQuery", -3.5),
            record("2025-12-02", Provider::Gcp, "Compute Engine", 7.25),
        ];
        let input_sum: f64 = records.iter().map(|r| r.cost).sum();
        for keys in [
            vec![GroupKey::Provider],
            vec![GroupKey::Service],
            vec![GroupKey::Month, GroupKey::Provider],
            vec![GroupKey::Date, GroupKey::Service, GroupKey::Env],
        ] {
            let group_sum: f64 = aggregate(&records, &keys).values().sum();
            assert!(
                (group_sum - input_sum).abs() < 1e-9,
                "conservation failed for {:?}",
                keys
            );
        }
    }

    #[test]
    fn fully_offset_group_stays_present_with_zero_total() {
        let records = vec![
            record("2025-12-01", Provider::Gcp, "BigQuery", 20.0),
            record("2025-12-03", Provider::Gcp, "BigQuery", -20.0),
        ];
        let totals = aggregate(&records, &[GroupKey::Service]);
        assert_eq!(totals.len(), 1);
        assert!(totals[&vec!["BigQuery".to_string()]].abs() < 1e-9);
    }

    #[test]
    fn empty_input_yields_empty_map() {
        let totals = aggregate(&[], &[GroupKey::Provider, GroupKey::Month]);
        assert!(totals.is_empty());
    }

    #[test]
    fn top_n_caps_and_sorts_descending() {
        let records = vec![
            record("2025-12-01", Provider::Aws, "EC2", 30.0),
            record("2025-12-01", Provider::Aws, "S3", 10.0),
            record("2025-12-01", Provider::Aws, "Lambda", 50.0),
            record("2025-12-01", Provider::Gcp, "BigQuery", 20.0),
        ];
        let top = top_n(&aggregate(&records, &[GroupKey::Service]), 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, vec!["Lambda".to_string()]);
        assert_eq!(top[1].0, vec!["EC2".to_string()]);
    }

    #[test]
    fn top_n_breaks_ties_by_key_order() {
        let records = vec![
            record("2025-12-01", Provider::Aws, "S3", 10.0),
            record("2025-12-01", Provider::Aws, "EC2", 10.0),
            record("2025-12-01", Provider::Aws, "Lambda", 10.0),
        ];
        let top = top_n(&aggregate(&records, &[GroupKey::Service]), 3);
        let names: Vec<&str> = top.iter().map(|(k, _)| k[0].as_str()).collect();
        assert_eq!(names, vec!["EC2", "Lambda", "S3"]);
    }

    #[test]
    fn summary_splits_usage_and_credits() {
        let records = vec![
            record("2025-12-01", Provider::Aws, "EC2", 100.0),
            record("2025-12-01", Provider::Gcp, "BigQuery", -25.0),
        ];
        let summary = build_summary(&records, 5);
        assert!((summary.total_cost - 75.0).abs() < 1e-9);
        assert!((summary.usage_cost - 100.0).abs() < 1e-9);
        assert!((summary.credit_total + 25.0).abs() < 1e-9);
        assert_eq!(summary.records, 2);
    }

    #[test]
    fn summary_monthly_is_newest_first_provider_alphabetical() {
        let records = vec![
            record("2025-11-15", Provider::Gcp, "BigQuery", 1.0),
            record("2025-12-01", Provider::Gcp, "BigQuery", 2.0),
            record("2025-12-20", Provider::Aws, "EC2", 3.0),
            record("2025-11-02", Provider::Aws, "EC2", 4.0),
        ];
        let summary = build_summary(&records, 5);
        let rows: Vec<(String, Provider)> = summary
            .monthly
            .iter()
            .map(|m| (m.month.clone(), m.provider))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("2025-12".to_string(), Provider::Aws),
                ("2025-12".to_string(), Provider::Gcp),
                ("2025-11".to_string(), Provider::Aws),
                ("2025-11".to_string(), Provider::Gcp),
            ]
        );
    }

    #[test]
    fn summary_top_services_respects_limit() {
        let records = vec![
            record("2025-12-01", Provider::Aws, "EC2", 30.0),
            record("2025-12-01", Provider::Aws, "S3", 10.0),
            record("2025-12-01", Provider::Aws, "Lambda", 50.0),
            record("2025-12-01", Provider::Gcp, "BigQuery", 20.0),
            record("2025-12-01", Provider::Gcp, "Cloud Run", 5.0),
            record("2025-12-01", Provider::Gcp, "GCS", 1.0),
        ];
        let summary = build_summary(&records, 5);
        assert_eq!(summary.top_services.len(), 5);
        assert_eq!(summary.top_services[0].service, "Lambda");
        assert!(summary
            .top_services
            .windows(2)
            .all(|w| w[0].total_cost >= w[1].total_cost));
    }
}
