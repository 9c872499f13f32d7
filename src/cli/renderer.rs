use colored::{control, Colorize};
use std::collections::BTreeMap;

use crate::core::detect::{AnomalyWindow, DetectionReport};
use crate::core::formatter::{format_group_key, format_share, format_usd};
use crate::core::models::billing::UnifiedBillingRecord;
use crate::core::models::profile::SourceProfile;
use crate::core::models::summary::SpendSummary;

/// Render the standard spend report as a colored (or plain) string.
///
/// Layout:
/// ```text
///  Cloud Spend (2400 records)
///   Total      $12,345.67
///   Usage      $12,500.00
///   Credits    -$154.33
///   By Provider:
///     AWS      $8,000.00  (1200 records)
///   Monthly:
///     2025-12  AWS  $8,000.00
///   Top Services:
///     EC2      $3,000.00
/// ```
pub fn render_summary(summary: &SpendSummary, use_color: bool) -> String {
    control::set_override(use_color);

    let mut lines: Vec<String> = Vec::new();
    lines.push(
        format!(" Cloud Spend ({} records)", summary.records)
            .bold()
            .to_string(),
    );
    lines.push(format!(
        "  {}      {}",
        "Total".cyan(),
        format_usd(summary.total_cost)
    ));
    lines.push(format!(
        "  {}      {}",
        "Usage".cyan(),
        format_usd(summary.usage_cost)
    ));
    lines.push(format!(
        "  {}    {}",
        "Credits".cyan(),
        format_usd(summary.credit_total)
    ));

    if !summary.by_provider.is_empty() {
        lines.push(format!("  {}:", "By Provider".cyan()));
        for spend in &summary.by_provider {
            lines.push(format!(
                "    {:<5} {:>12}  ({} records, {})",
                spend.provider.display_name(),
                format_usd(spend.total_cost),
                spend.records,
                format_share(spend.records, summary.records)
            ));
        }
    }

    if !summary.monthly.is_empty() {
        lines.push(format!("  {}:", "Monthly".cyan()));
        for month in &summary.monthly {
            lines.push(format!(
                "    {}  {:<5} {:>12}",
                month.month,
                month.provider.display_name(),
                format_usd(month.total_cost)
            ));
        }
    }

    if !summary.top_services.is_empty() {
        lines.push(format!("  {}:", "Top Services".cyan()));
        for service in &summary.top_services {
            lines.push(format!(
                "    {:<24} {:>12}",
                service.service,
                format_usd(service.total_cost)
            ));
        }
    }

    lines.join("\n")
}

/// Render an ad-hoc `--by` grouping table.
pub fn render_grouping(
    totals: &BTreeMap<Vec<String>, f64>,
    keys_label: &str,
    use_color: bool,
) -> String {
    control::set_override(use_color);

    let mut lines: Vec<String> = Vec::new();
    lines.push(
        format!(" Spend by {} ({} groups)", keys_label, totals.len())
            .bold()
            .to_string(),
    );
    for (key, total) in totals {
        lines.push(format!(
            "  {:<40} {:>12}",
            format_group_key(key),
            format_usd(*total)
        ));
    }
    lines.join("\n")
}

/// Render a detection report: the matched window rows with flagged outliers
/// highlighted in red.
pub fn render_detection(
    report: &DetectionReport,
    window: &AnomalyWindow,
    use_color: bool,
) -> String {
    control::set_override(use_color);

    let mut lines: Vec<String> = Vec::new();
    lines.push(
        format!(
            " Anomaly scan: {} / {} / {}",
            window.service, window.team, window.env
        )
        .bold()
        .to_string(),
    );

    let until = window
        .end_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "open".to_string());
    lines.push(format!(
        "  {}     {} \u{2192} {}",
        "Window".cyan(),
        window.start_date.format("%Y-%m-%d"),
        until
    ));
    lines.push(format!(
        "  {}  {}",
        "Threshold".cyan(),
        format_usd(window.threshold)
    ));
    lines.push(format!(
        "  {}    {} rows, {} flagged",
        "Matched".cyan(),
        report.matched.len(),
        report.flagged.len()
    ));

    if report.matched.is_empty() {
        lines.push("    0 rows matched (check service/team/env spelling)".dimmed().to_string());
        return lines.join("\n");
    }

    lines.push(String::new());
    for record in &report.matched {
        let row = render_record_row(record);
        if window.is_outlier(record) {
            lines.push(format!("    {}  {}", row.red().bold(), "OUTLIER".red().bold()));
        } else {
            lines.push(format!("    {}", row));
        }
    }

    lines.join("\n")
}

fn render_record_row(record: &UnifiedBillingRecord) -> String {
    format!(
        "{}  {:<4} {:<12} {:>10}",
        record.date.format("%Y-%m-%d"),
        record.provider.display_name(),
        record.billing_entity,
        format_usd(record.cost)
    )
}

/// Render per-source row/null profiles.
pub fn render_profiles(profiles: &[SourceProfile], use_color: bool) -> String {
    control::set_override(use_color);

    let mut lines: Vec<String> = Vec::new();
    for profile in profiles {
        lines.push(
            format!(
                " {} export ({} rows)",
                profile.provider.display_name(),
                profile.rows
            )
            .bold()
            .to_string(),
        );
        for column in &profile.null_counts {
            let share = format_share(column.nulls, profile.rows);
            let line = format!("  {:<12} {:>6} nulls  ({})", column.column, column.nulls, share);
            if column.nulls > 0 {
                lines.push(line.yellow().to_string());
            } else {
                lines.push(line);
            }
        }
    }
    lines.join("\n")
}
