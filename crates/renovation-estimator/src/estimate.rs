use std::collections::BTreeMap;

use calc_core::{require_non_negative, round_cents, CalcResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONTINGENCY_PERCENT: f64 = 10.0;

/// Category used when a line does not name one.
const DEFAULT_CATEGORY: &str = "Other";

/// One renovation line as submitted. Every field is optional because an
/// incomplete line is skipped with a reason, not rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenovationLineItem {
    pub label: Option<String>,
    pub category: Option<String>,
    pub cost: Option<f64>,
}

/// A line that was left out of the estimate, and why.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedItem {
    /// Position of the line in the submitted list, zero-based.
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenovationEstimate {
    pub subtotal: f64,
    pub contingency_percent: f64,
    pub contingency_amount: f64,
    pub total: f64,
    pub category_totals: BTreeMap<String, f64>,
    pub skipped: Vec<SkippedItem>,
}

impl RenovationEstimate {
    /// Roll counted lines up into the estimate: subtotal, per-category
    /// totals, then the contingency on top. `lines` pairs each category
    /// with its unrounded amount.
    pub(crate) fn from_lines(
        lines: Vec<(String, f64)>,
        contingency_percent: f64,
        skipped: Vec<SkippedItem>,
    ) -> Self {
        let mut category_totals: BTreeMap<String, f64> = BTreeMap::new();
        let mut subtotal = 0.0;
        for (category, amount) in lines {
            *category_totals.entry(category).or_insert(0.0) += amount;
            subtotal += amount;
        }
        let category_totals = category_totals
            .into_iter()
            .map(|(category, amount)| (category, round_cents(amount)))
            .collect();

        let subtotal = round_cents(subtotal);
        let contingency_amount = round_cents(subtotal * contingency_percent / 100.0);

        Self {
            subtotal,
            contingency_percent,
            contingency_amount,
            total: round_cents(subtotal + contingency_amount),
            category_totals,
            skipped,
        }
    }
}

/// Budget from caller-priced lines. A line needs a label and a finite,
/// non-negative cost; anything else lands in `skipped` with a reason.
pub fn estimate(
    items: &[RenovationLineItem],
    contingency_percent: Option<f64>,
) -> CalcResult<RenovationEstimate> {
    let contingency = contingency_percent.unwrap_or(DEFAULT_CONTINGENCY_PERCENT);
    require_non_negative("contingency_percent", contingency)?;

    let mut lines = Vec::with_capacity(items.len());
    let mut skipped = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let has_label = matches!(
            item.label.as_deref().map(str::trim),
            Some(label) if !label.is_empty()
        );
        if !has_label {
            skipped.push(SkippedItem {
                index,
                reason: "missing label".into(),
            });
            continue;
        }
        let cost = match item.cost {
            Some(cost) if cost.is_finite() && cost >= 0.0 => cost,
            Some(cost) if !cost.is_finite() => {
                skipped.push(SkippedItem {
                    index,
                    reason: "cost is not a number".into(),
                });
                continue;
            }
            Some(cost) => {
                skipped.push(SkippedItem {
                    index,
                    reason: format!("negative cost {cost}"),
                });
                continue;
            }
            None => {
                skipped.push(SkippedItem {
                    index,
                    reason: "missing cost".into(),
                });
                continue;
            }
        };

        let category = match item.category.as_deref().map(str::trim) {
            Some(category) if !category.is_empty() => category.to_string(),
            _ => DEFAULT_CATEGORY.to_string(),
        };
        lines.push((category, cost));
    }

    Ok(RenovationEstimate::from_lines(lines, contingency, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str, category: Option<&str>, cost: f64) -> RenovationLineItem {
        RenovationLineItem {
            label: Some(label.to_string()),
            category: category.map(str::to_string),
            cost: Some(cost),
        }
    }

    #[test]
    fn rolls_up_by_category_with_contingency() {
        let items = [
            item("Cabinets", Some("Kitchen"), 5_000.0),
            item("Countertop", Some("Kitchen"), 1_500.0),
            item("Vanity", Some("Bathroom"), 1_000.0),
            item("Dump run", None, 500.0),
        ];
        let result = estimate(&items, None).unwrap();
        assert_eq!(result.subtotal, 8_000.0);
        assert_eq!(result.contingency_percent, 10.0);
        assert_eq!(result.contingency_amount, 800.0);
        assert_eq!(result.total, 8_800.0);
        assert_eq!(result.category_totals["Kitchen"], 6_500.0);
        assert_eq!(result.category_totals["Bathroom"], 1_000.0);
        assert_eq!(result.category_totals["Other"], 500.0);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn bad_lines_are_skipped_with_reasons() {
        let items = [
            item("Cabinets", Some("Kitchen"), 5_000.0),
            RenovationLineItem {
                label: None,
                category: Some("Kitchen".into()),
                cost: Some(1_000.0),
            },
            RenovationLineItem {
                label: Some("Flooring".into()),
                category: None,
                cost: None,
            },
            item("Painting", None, f64::NAN),
            item("Rebate", None, -250.0),
            RenovationLineItem {
                label: Some("   ".into()),
                category: None,
                cost: Some(100.0),
            },
        ];
        let result = estimate(&items, Some(0.0)).unwrap();
        // Only the cabinets line counts.
        assert_eq!(result.subtotal, 5_000.0);
        assert_eq!(result.total, 5_000.0);
        assert_eq!(result.skipped.len(), 5);
        assert_eq!(result.skipped[0].index, 1);
        assert_eq!(result.skipped[0].reason, "missing label");
        assert_eq!(result.skipped[1].reason, "missing cost");
        assert_eq!(result.skipped[2].reason, "cost is not a number");
        assert!(result.skipped[3].reason.contains("negative cost"));
        assert_eq!(result.skipped[4].reason, "missing label");
    }

    #[test]
    fn zero_cost_lines_count() {
        let items = [item("Donated paint", Some("Paint"), 0.0)];
        let result = estimate(&items, None).unwrap();
        assert_eq!(result.subtotal, 0.0);
        assert_eq!(result.category_totals["Paint"], 0.0);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn empty_list_is_a_zero_estimate() {
        let result = estimate(&[], None).unwrap();
        assert_eq!(result.subtotal, 0.0);
        assert_eq!(result.total, 0.0);
        assert!(result.category_totals.is_empty());
    }

    #[test]
    fn negative_contingency_is_rejected() {
        assert!(estimate(&[], Some(-5.0)).is_err());
    }

    #[test]
    fn contingency_rounds_to_cents() {
        let items = [item("Trim", None, 333.33)];
        let result = estimate(&items, Some(10.0)).unwrap();
        // 33.333 rounds half up to 33.33.
        assert_eq!(result.contingency_amount, 33.33);
        assert_eq!(result.total, 366.66);
    }
}
