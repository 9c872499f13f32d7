use anyhow::{Context, Result};
use std::path::Path;

use crate::core::models::billing::RawBillingRecord;

/// Read one provider export into raw records.
///
/// No field validation happens here; dates and costs stay unparsed strings
/// for the normalizer. Empty CSV fields become None, unknown columns are
/// ignored and missing columns default to None, so AWS and GCP exports load
/// through the same path despite their different entity columns.
pub fn load_csv(path: &Path) -> Result<Vec<RawBillingRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut records: Vec<RawBillingRecord> = Vec::new();
    for (row, result) in reader.deserialize::<RawBillingRecord>().enumerate() {
        // +2: one for the header line, one for 1-based numbering.
        let record = result
            .with_context(|| format!("{}: bad CSV row at line {}", path.display(), row + 2))?;
        records.push(record);
    }
    Ok(records)
}
