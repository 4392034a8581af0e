//! Source-priority field resolution: the (style, season) join engine.
//!
//! Cost-sheet rows are grouped per key first. Multi-valued attributes
//! (factory, country, design team, developer) accumulate the *set* of
//! distinct non-empty values — multiple colors of one style legitimately
//! come from different factories — and collapse to a single value or the
//! `"Multiple"` sentinel only at the final projection step. Numeric
//! fields take the first non-zero value per key. Product rows then fill
//! only what is still empty; a cost-sheet-sourced value is never
//! overwritten by line-list data.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::records::{CostRecord, CostSource, ProductRecord};
use crate::types::{Provenance, ReconciledStyleSeason, Resolved, MULTIPLE};

/// Set-valued accumulator for one multi-valued attribute.
#[derive(Debug, Default)]
struct MultiField {
    values: BTreeSet<String>,
    source: Provenance,
}

impl MultiField {
    fn add(&mut self, raw: &str, source: Provenance) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        self.values.insert(trimmed.to_string());
        self.source = self.source.stronger(source);
    }

    fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Final projection: one member → that value, several → `"Multiple"`,
    /// none → absent.
    fn project(&self) -> Resolved<String> {
        match self.values.len() {
            0 => Resolved::none(),
            1 => Resolved::from(self.values.iter().next().cloned().unwrap_or_default(), self.source),
            _ => Resolved::from(MULTIPLE.to_string(), self.source),
        }
    }

    fn to_sorted_vec(&self) -> Vec<String> {
        self.values.iter().cloned().collect()
    }
}

/// First-non-zero accumulator for one numeric field.
#[derive(Debug, Default)]
struct NumField {
    value: Option<f64>,
    source: Provenance,
}

impl NumField {
    fn fill(&mut self, value: f64, source: Provenance) {
        if self.value.is_none() && value > 0.0 {
            self.value = Some(value);
            self.source = source;
        }
    }

    fn project(&self) -> Resolved<f64> {
        Resolved {
            value: self.value,
            source: if self.value.is_some() {
                self.source
            } else {
                Provenance::None
            },
        }
    }
}

#[derive(Debug, Default)]
struct KeyAccumulator {
    description: Option<String>,
    division: Option<String>,
    category: Option<String>,

    factory: MultiField,
    country: MultiField,
    design_team: MultiField,
    developer: MultiField,

    fob: NumField,
    landed: NumField,
    wholesale: NumField,
    msrp: NumField,

    cost_tag: Provenance,
}

fn cost_source_provenance(source: CostSource) -> Provenance {
    match source {
        CostSource::LandedCost => Provenance::LandedCost,
        CostSource::StandardCost => Provenance::StandardCost,
    }
}

fn fill_if_empty(slot: &mut Option<String>, raw: &str) {
    if slot.is_none() && !raw.trim().is_empty() {
        *slot = Some(raw.trim().to_string());
    }
}

/// Merge cost-sheet and line-list records into one reconciled record per
/// (style, season) key.
pub fn reconcile(
    cost_records: &[CostRecord],
    product_records: &[ProductRecord],
) -> Vec<ReconciledStyleSeason> {
    let mut keys: BTreeMap<(String, String), KeyAccumulator> = BTreeMap::new();

    // Step 1: fold cost-sheet rows. Multiple rows per key are different
    // components of the style; accumulate, never overwrite.
    for record in cost_records {
        let acc = keys
            .entry((record.style_number.clone(), record.season.clone()))
            .or_default();
        let source = cost_source_provenance(record.source);

        acc.factory.add(&record.factory, source);
        acc.country.add(&record.country_of_origin, source);
        acc.design_team.add(&record.design_team, source);
        acc.developer.add(&record.developer, source);

        acc.fob.fill(record.fob_cost, source);
        acc.landed.fill(record.landed_cost, source);
        acc.wholesale.fill(record.suggested_wholesale, source);
        acc.msrp.fill(record.suggested_msrp, source);

        acc.cost_tag = acc.cost_tag.stronger(source);
    }

    // Step 2: product pass. New keys are synthesized wholesale; existing
    // keys are only backfilled where still empty.
    for product in product_records {
        let acc = keys
            .entry((product.style_number.clone(), product.season.clone()))
            .or_default();

        fill_if_empty(&mut acc.description, &product.description);
        fill_if_empty(&mut acc.division, &product.division);
        fill_if_empty(&mut acc.category, &product.category);

        if acc.factory.is_empty() {
            acc.factory.add(&product.factory, Provenance::Product);
        }
        if acc.country.is_empty() {
            acc.country.add(&product.country_of_origin, Provenance::Product);
        }

        acc.landed.fill(product.cost, Provenance::Product);
        acc.wholesale.fill(product.wholesale_price, Provenance::Product);
        acc.msrp.fill(product.msrp, Provenance::Product);

        if acc.cost_tag == Provenance::None && product.cost > 0.0 {
            acc.cost_tag = Provenance::Product;
        }
    }

    // Step 3: project. BTreeMap iteration keeps the output deterministic.
    keys.into_iter()
        .map(|((style_number, season), acc)| ReconciledStyleSeason {
            style_number,
            season,
            description: acc.description,
            division: acc.division,
            category: acc.category,
            factory: acc.factory.project(),
            country: acc.country.project(),
            design_team: acc.design_team.project(),
            developer: acc.developer.project(),
            factories: acc.factory.to_sorted_vec(),
            countries: acc.country.to_sorted_vec(),
            design_teams: acc.design_team.to_sorted_vec(),
            developers: acc.developer.to_sorted_vec(),
            fob_cost: acc.fob.project(),
            landed_cost: acc.landed.project(),
            wholesale_price: acc.wholesale.project(),
            msrp: acc.msrp.project(),
            cost_provenance: acc.cost_tag,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost_record(style: &str, season: &str) -> CostRecord {
        CostRecord {
            style_number: style.into(),
            season: season.into(),
            ..CostRecord::default()
        }
    }

    fn product_record(style: &str, season: &str) -> ProductRecord {
        ProductRecord {
            style_number: style.into(),
            season: season.into(),
            ..ProductRecord::default()
        }
    }

    fn find<'a>(
        records: &'a [ReconciledStyleSeason],
        style: &str,
        season: &str,
    ) -> &'a ReconciledStyleSeason {
        records
            .iter()
            .find(|r| r.style_number == style && r.season == season)
            .expect("key should be present")
    }

    #[test]
    fn multiple_factories_collapse_to_sentinel_at_projection() {
        let mut a = cost_record("A1", "25SP");
        a.factory = "Evergreen Apparel".into();
        a.landed_cost = 22.0;
        let mut b = cost_record("A1", "25SP");
        b.factory = "Pacific Knits".into();
        b.landed_cost = 24.0; // second color, numeric ignored

        let records = reconcile(&[a, b], &[]);
        let rec = find(&records, "A1", "25SP");

        assert_eq!(rec.factory.value.as_deref(), Some(MULTIPLE));
        assert_eq!(
            rec.factories,
            vec!["Evergreen Apparel".to_string(), "Pacific Knits".to_string()]
        );
        // First non-zero landed cost wins.
        assert_eq!(rec.landed_cost.value, Some(22.0));
    }

    #[test]
    fn single_factory_projects_as_itself() {
        let mut a = cost_record("A1", "25SP");
        a.factory = "Evergreen Apparel".into();
        let records = reconcile(&[a], &[]);
        let rec = find(&records, "A1", "25SP");
        assert_eq!(rec.factory.value.as_deref(), Some("Evergreen Apparel"));
        assert_eq!(rec.factory.source, Provenance::LandedCost);
    }

    #[test]
    fn empty_attribute_is_absent_with_provenance_none() {
        let records = reconcile(&[cost_record("A1", "25SP")], &[]);
        let rec = find(&records, "A1", "25SP");
        assert!(rec.design_team.value.is_none());
        assert_eq!(rec.design_team.source, Provenance::None);
        assert!(rec.design_teams.is_empty());
    }

    #[test]
    fn product_backfill_never_overwrites_cost_sheet_values() {
        let mut cost = cost_record("A1", "25SP");
        cost.landed_cost = 22.0;
        cost.factory = "Evergreen Apparel".into();

        let mut product = product_record("A1", "25SP");
        product.cost = 20.0;
        product.factory = "Line List Factory".into();
        product.wholesale_price = 50.0;

        let records = reconcile(&[cost], &[product]);
        let rec = find(&records, "A1", "25SP");

        assert_eq!(rec.landed_cost.value, Some(22.0));
        assert_eq!(rec.landed_cost.source, Provenance::LandedCost);
        assert_eq!(rec.factory.value.as_deref(), Some("Evergreen Apparel"));
        // Wholesale was empty on the cost sheet, so product fills it.
        assert_eq!(rec.wholesale_price.value, Some(50.0));
        assert_eq!(rec.wholesale_price.source, Provenance::Product);
    }

    #[test]
    fn product_only_key_is_synthesized_with_product_provenance() {
        let mut product = product_record("B2", "25FA");
        product.cost = 18.0;
        product.wholesale_price = 45.0;
        product.description = "Alpine Shell".into();
        product.factory = "Pacific Knits".into();

        let records = reconcile(&[], &[product]);
        let rec = find(&records, "B2", "25FA");

        assert_eq!(rec.landed_cost.value, Some(18.0));
        assert_eq!(rec.landed_cost.source, Provenance::Product);
        assert_eq!(rec.cost_provenance, Provenance::Product);
        assert_eq!(rec.description.as_deref(), Some("Alpine Shell"));
        assert_eq!(rec.factory.value.as_deref(), Some("Pacific Knits"));
    }

    #[test]
    fn cost_tag_prefers_landed_over_standard() {
        let mut standard = cost_record("A1", "25SP");
        standard.source = crate::records::CostSource::StandardCost;
        standard.landed_cost = 21.0;
        let mut landed = cost_record("A1", "25SP");
        landed.landed_cost = 22.0;

        let records = reconcile(&[standard, landed], &[]);
        let rec = find(&records, "A1", "25SP");
        assert_eq!(rec.cost_provenance, Provenance::LandedCost);
        // First non-zero still wins numerically, regardless of tag rank.
        assert_eq!(rec.landed_cost.value, Some(21.0));
    }

    #[test]
    fn key_with_no_cost_anywhere_tags_none() {
        let product = product_record("C3", "25SP");
        let records = reconcile(&[], &[product]);
        let rec = find(&records, "C3", "25SP");
        assert_eq!(rec.cost_provenance, Provenance::None);
        assert!(rec.landed_cost.value.is_none());
    }

    #[test]
    fn same_style_different_seasons_stay_separate() {
        let spring = product_record("A1", "25SP");
        let fall = product_record("A1", "25FA");
        let records = reconcile(&[], &[spring, fall]);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn zero_numerics_never_resolve() {
        let mut cost = cost_record("A1", "25SP");
        cost.fob_cost = 0.0;
        let records = reconcile(&[cost], &[]);
        let rec = find(&records, "A1", "25SP");
        assert!(rec.fob_cost.value.is_none());
    }
}
