use serde::Serialize;

use crate::core::providers::Provider;

#[derive(Debug, Clone, Serialize)]
pub struct ProviderSpend {
    pub provider: Provider,
    pub records: usize,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlySpend {
    /// Calendar month as "YYYY-MM".
    pub month: String,
    pub provider: Provider,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceSpend {
    pub service: String,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpendSummary {
    pub records: usize,
    pub total_cost: f64,
    /// Sum of positive costs only.
    pub usage_cost: f64,
    /// Sum of negative costs (credits/refunds); zero or negative.
    pub credit_total: f64,
    pub by_provider: Vec<ProviderSpend>,
    /// Month-by-provider totals, newest month first.
    pub monthly: Vec<MonthlySpend>,
    /// Most expensive services, highest total first.
    pub top_services: Vec<ServiceSpend>,
}
