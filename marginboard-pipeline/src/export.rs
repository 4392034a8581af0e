//! Export writers: the canonical-channel CSV document and the per-style
//! margin JSON payload.
//!
//! CSV is one row per reconciled record. The header names and their
//! order are part of the contract with every export consumer — changing
//! either breaks downstream spreadsheets.

use crate::error::EngineResult;
use crate::types::{StyleCandidate, StyleMargin};

/// Export header row. Order is contractual.
pub const EXPORT_HEADERS: [&str; 10] = [
    "Style",
    "Description",
    "Season",
    "Factory",
    "Country",
    "Design Team",
    "Developer",
    "FOB Cost",
    "Landed Cost",
    "Margin %",
];

fn money(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

fn percent(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}")).unwrap_or_default()
}

/// Render the reconciled candidate set as a CSV document. Undefined
/// values export as empty cells, never as zeros.
pub fn channel_export_csv(candidates: &[StyleCandidate]) -> EngineResult<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;

    for candidate in candidates {
        let rec = &candidate.reconciled;
        writer.write_record(&[
            rec.style_number.clone(),
            rec.description.clone().unwrap_or_default(),
            rec.season.clone(),
            rec.factory.value.clone().unwrap_or_default(),
            rec.country.value.clone().unwrap_or_default(),
            rec.design_team.value.clone().unwrap_or_default(),
            rec.developer.value.clone().unwrap_or_default(),
            money(rec.fob_cost.value),
            money(rec.landed_cost.value),
            percent(candidate.baseline_margin_pct),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Render the per-style margin summaries as a JSON document.
pub fn style_margins_json(candidates: &[StyleCandidate]) -> EngineResult<String> {
    let rows: Vec<StyleMargin> = candidates.iter().map(StyleCandidate::style_margin).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}
