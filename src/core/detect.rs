use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::models::billing::UnifiedBillingRecord;

/// Dimension filter, date window and cost ceiling for one detection run.
///
/// Supplied by the caller per run; nothing here is persisted. The window does
/// not check that `service` exists in the data; an unknown name simply
/// matches nothing, which is the caller's misconfiguration to spot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyWindow {
    pub service: String,
    pub team: String,
    pub env: String,
    pub start_date: NaiveDate,
    /// Open-ended when None.
    pub end_date: Option<NaiveDate>,
    /// Cost ceiling in dollars; rows strictly above it are flagged.
    pub threshold: f64,
}

impl AnomalyWindow {
    pub fn matches(&self, record: &UnifiedBillingRecord) -> bool {
        record.service == self.service
            && record.team == self.team
            && record.env == self.env
            && record.date >= self.start_date
            && self.end_date.map_or(true, |end| record.date <= end)
    }

    pub fn is_outlier(&self, record: &UnifiedBillingRecord) -> bool {
        record.cost > self.threshold
    }
}

/// Lazy, order-preserving view of the records inside the window.
///
/// Callers needing only the filtered slice pay nothing for outlier flagging.
pub fn scan_window<'a>(
    records: &'a [UnifiedBillingRecord],
    window: &'a AnomalyWindow,
) -> impl Iterator<Item = &'a UnifiedBillingRecord> + 'a {
    records.iter().filter(move |r| window.matches(r))
}

/// Lazy threshold filter over rows already inside the window.
pub fn flag_outliers<'a>(
    rows: &'a [UnifiedBillingRecord],
    window: &'a AnomalyWindow,
) -> impl Iterator<Item = &'a UnifiedBillingRecord> + 'a {
    rows.iter().filter(move |r| window.is_outlier(r))
}

/// Matched window rows (date ascending) plus the flagged subset.
#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub matched: Vec<UnifiedBillingRecord>,
    pub flagged: Vec<UnifiedBillingRecord>,
}

/// Run a full detection pass over unified records.
///
/// `matched` is sorted by date ascending; the sort is stable, so input order
/// is preserved within a date. `flagged` is the subsequence of `matched`
/// whose cost exceeds the threshold. Inputs are never mutated and identical
/// inputs produce identical output. An empty `matched` is a legitimate
/// "nothing in the window" outcome, not an error.
pub fn detect(records: &[UnifiedBillingRecord], window: &AnomalyWindow) -> DetectionReport {
    let mut matched: Vec<UnifiedBillingRecord> = scan_window(records, window).cloned().collect();
    matched.sort_by_key(|r| r.date);
    let flagged: Vec<UnifiedBillingRecord> =
        flag_outliers(&matched, window).cloned().collect();
    DetectionReport { matched, flagged }
}
