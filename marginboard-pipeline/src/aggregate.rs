//! Generic grouping engine.
//!
//! One reducer serves every dashboard dimension: compute a key per
//! record, accumulate revenue/units/COGS, and derive the bucket margin
//! from the accumulated totals so it is always revenue-weighted — an
//! arithmetic mean of per-record margin percentages is an invariant
//! violation here. Sorting is a separate, explicit step.

use serde::Serialize;

use std::collections::BTreeMap;

use crate::types::StyleCandidate;

/// Composite-key delimiter. U+001F (unit separator) cannot appear in
/// business data; `composite_key` strips it from components anyway so a
/// key always splits back into its parts losslessly.
pub const KEY_DELIMITER: char = '\u{1F}';

/// Join key components into one composite grouping key.
pub fn composite_key<S: AsRef<str>>(parts: &[S]) -> String {
    let cleaned: Vec<String> = parts
        .iter()
        .map(|part| part.as_ref().replace(KEY_DELIMITER, ""))
        .collect();
    cleaned.join(&KEY_DELIMITER.to_string())
}

/// Split a composite key back into its components.
pub fn split_key(key: &str) -> Vec<String> {
    key.split(KEY_DELIMITER).map(str::to_string).collect()
}

/// The measures one record contributes to its bucket.
#[derive(Clone, Copy, Debug, Default)]
pub struct Measure {
    pub revenue: f64,
    pub units: f64,
    /// Cost of goods for this record; `None` when no cost was resolved,
    /// in which case the record contributes to revenue/units but not to
    /// the bucket margin.
    pub cogs: Option<f64>,
}

/// Measures for a style candidate.
pub fn candidate_measure(candidate: &StyleCandidate) -> Measure {
    Measure {
        revenue: candidate.total_revenue,
        units: candidate.total_units,
        cogs: candidate.cogs,
    }
}

/// One dimension value's totals.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AggregationBucket {
    pub key: String,
    /// Composite keys split back into components; single-dimension keys
    /// have exactly one part.
    pub key_parts: Vec<String>,
    pub revenue: f64,
    pub units: f64,
    pub count: usize,
    /// Revenue carried by records that had a known cost.
    pub costed_revenue: f64,
    pub cogs: f64,
    /// Revenue-weighted margin over the costed revenue; `None` when no
    /// record in the bucket had both revenue and cost.
    pub margin_pct: Option<f64>,
}

impl AggregationBucket {
    fn empty(key: String) -> Self {
        Self {
            key_parts: split_key(&key),
            key,
            revenue: 0.0,
            units: 0.0,
            count: 0,
            costed_revenue: 0.0,
            cogs: 0.0,
            margin_pct: None,
        }
    }

    fn finish(&mut self) {
        self.margin_pct = if self.costed_revenue > 0.0 {
            Some((self.costed_revenue - self.cogs) / self.costed_revenue * 100.0)
        } else {
            None
        };
    }
}

/// Group records by a computed key. Buckets come back in key order;
/// callers sort explicitly via [`sort_buckets`].
pub fn group_by<R>(
    records: &[R],
    key_fn: impl Fn(&R) -> String,
    measure_fn: impl Fn(&R) -> Measure,
) -> Vec<AggregationBucket> {
    group_by_with_domain(records, key_fn, measure_fn, &[] as &[&str])
}

/// Like [`group_by`], but guarantees a (possibly zero-valued) bucket for
/// every key in `domain`, so fixed comparisons — the six channel cards,
/// the four tiers — always have a stable shape.
pub fn group_by_with_domain<R, S: AsRef<str>>(
    records: &[R],
    key_fn: impl Fn(&R) -> String,
    measure_fn: impl Fn(&R) -> Measure,
    domain: &[S],
) -> Vec<AggregationBucket> {
    let mut buckets: BTreeMap<String, AggregationBucket> = domain
        .iter()
        .map(|key| {
            let key = key.as_ref().to_string();
            (key.clone(), AggregationBucket::empty(key))
        })
        .collect();

    for record in records {
        let key = key_fn(record);
        let measure = measure_fn(record);
        let bucket = buckets
            .entry(key.clone())
            .or_insert_with(|| AggregationBucket::empty(key));

        bucket.revenue += measure.revenue;
        bucket.units += measure.units;
        bucket.count += 1;
        if let Some(cogs) = measure.cogs {
            bucket.costed_revenue += measure.revenue;
            bucket.cogs += cogs;
        }
    }

    let mut result: Vec<AggregationBucket> = buckets.into_values().collect();
    for bucket in &mut result {
        bucket.finish();
    }
    result
}

/// Sortable bucket fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Revenue,
    Units,
    Margin,
    Key,
}

/// Sort buckets by one field. Default dashboard order is descending
/// revenue. String comparison is case-insensitive; buckets with an
/// undefined margin sort after every defined one regardless of
/// direction, so they never surface as top results.
pub fn sort_buckets(buckets: &mut [AggregationBucket], field: SortField, descending: bool) {
    use std::cmp::Ordering;

    buckets.sort_by(|a, b| {
        let ordering = match field {
            SortField::Revenue => cmp_f64(a.revenue, b.revenue, descending),
            SortField::Units => cmp_f64(a.units, b.units, descending),
            SortField::Margin => match (a.margin_pct, b.margin_pct) {
                (Some(ma), Some(mb)) => cmp_f64(ma, mb, descending),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortField::Key => {
                let ka = a.key.to_lowercase();
                let kb = b.key.to_lowercase();
                if descending {
                    kb.cmp(&ka)
                } else {
                    ka.cmp(&kb)
                }
            }
        };
        ordering
    });
}

fn cmp_f64(a: f64, b: f64, descending: bool) -> std::cmp::Ordering {
    let ordering = a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal);
    if descending {
        ordering.reverse()
    } else {
        ordering
    }
}

/// Truncate to the first `n` buckets. Pair with [`sort_buckets`].
pub fn top_n(mut buckets: Vec<AggregationBucket>, n: usize) -> Vec<AggregationBucket> {
    buckets.truncate(n);
    buckets
}

/// Derive the gender dimension from a division description. Checks the
/// women's patterns first: "WOMENS" contains "MENS".
pub fn gender_from_division(division: &str) -> &'static str {
    let upper = division.to_uppercase();
    if upper.contains("WOMEN") || upper.starts_with("W ") {
        "Womens"
    } else if upper.contains("MEN") || upper.starts_with("M ") {
        "Mens"
    } else {
        "Unisex"
    }
}
