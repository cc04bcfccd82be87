use calc_core::{ceil_to_multiple, require_non_negative, CalcResult};
use serde::{Deserialize, Serialize};

use crate::estimate::{RenovationEstimate, SkippedItem, DEFAULT_CONTINGENCY_PERCENT};

/// Quoting block for the $500 rule.
const QUOTE_STEP: f64 = 500.0;

/// Work types with a standard unit cost. `Custom` carries its own amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenovationKind {
    Kitchen,
    Bathroom,
    Window,
    FlooringSqft,
    PaintGallon,
    Custom,
}

impl RenovationKind {
    /// Standard cost per unit. None for `Custom`.
    pub fn unit_cost(&self) -> Option<f64> {
        match self {
            RenovationKind::Kitchen => Some(10_000.0),
            RenovationKind::Bathroom => Some(5_000.0),
            RenovationKind::Window => Some(500.0),
            RenovationKind::FlooringSqft => Some(5.0),
            RenovationKind::PaintGallon => Some(500.0),
            RenovationKind::Custom => None,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            RenovationKind::Kitchen | RenovationKind::Bathroom => "room",
            RenovationKind::Window => "window",
            RenovationKind::FlooringSqft => "square foot",
            RenovationKind::PaintGallon => "gallon",
            RenovationKind::Custom => "flat amount",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            RenovationKind::Kitchen => "Kitchen",
            RenovationKind::Bathroom => "Bathroom",
            RenovationKind::Window => "Windows",
            RenovationKind::FlooringSqft => "Flooring",
            RenovationKind::PaintGallon => "Paint",
            RenovationKind::Custom => "Other",
        }
    }

    /// Flooring is quoted per square foot and customs arrive at odd
    /// amounts, so both get bumped up to the next $500 block.
    fn rounds_up_to_step(&self) -> bool {
        matches!(self, RenovationKind::FlooringSqft | RenovationKind::Custom)
    }
}

/// One catalog-priced line. `cost` only applies to `Custom` items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub kind: RenovationKind,
    /// Rooms, windows, square feet or gallons. Default 1.
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
}

/// Unit-cost reference for one kind, as listed by the API.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub kind: RenovationKind,
    pub label: &'static str,
    pub unit: &'static str,
    pub unit_cost: Option<f64>,
    pub rounds_up_to_500: bool,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        kind: RenovationKind::Kitchen,
        label: "Kitchen, base renovation",
        unit: "room",
        unit_cost: Some(10_000.0),
        rounds_up_to_500: false,
    },
    CatalogEntry {
        kind: RenovationKind::Bathroom,
        label: "Bathroom, base renovation",
        unit: "room",
        unit_cost: Some(5_000.0),
        rounds_up_to_500: false,
    },
    CatalogEntry {
        kind: RenovationKind::Window,
        label: "Window replacement",
        unit: "window",
        unit_cost: Some(500.0),
        rounds_up_to_500: false,
    },
    CatalogEntry {
        kind: RenovationKind::FlooringSqft,
        label: "Floating floor",
        unit: "square foot",
        unit_cost: Some(5.0),
        rounds_up_to_500: true,
    },
    CatalogEntry {
        kind: RenovationKind::PaintGallon,
        label: "Paint, labour included",
        unit: "gallon",
        unit_cost: Some(500.0),
        rounds_up_to_500: false,
    },
    CatalogEntry {
        kind: RenovationKind::Custom,
        label: "Custom work, quoted",
        unit: "flat amount",
        unit_cost: None,
        rounds_up_to_500: true,
    },
];

/// Standard unit costs this estimator prices with.
pub fn catalog() -> &'static [CatalogEntry] {
    CATALOG
}

/// Budget from catalog items priced at standard unit costs. Lines that
/// cannot be priced (bad quantity, custom without an amount) are skipped
/// with a reason, like the free-form estimator.
pub fn catalog_estimate(
    items: &[CatalogItem],
    contingency_percent: Option<f64>,
) -> CalcResult<RenovationEstimate> {
    let contingency = contingency_percent.unwrap_or(DEFAULT_CONTINGENCY_PERCENT);
    require_non_negative("contingency_percent", contingency)?;

    let mut lines = Vec::with_capacity(items.len());
    let mut skipped = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let quantity = item.quantity.unwrap_or(1.0);
        if !quantity.is_finite() || quantity <= 0.0 {
            skipped.push(SkippedItem {
                index,
                reason: format!("quantity must be above zero, got {quantity}"),
            });
            continue;
        }

        let amount = match item.kind.unit_cost() {
            Some(unit_cost) => unit_cost * quantity,
            None => match item.cost {
                Some(cost) if cost.is_finite() && cost >= 0.0 => cost,
                Some(cost) => {
                    skipped.push(SkippedItem {
                        index,
                        reason: format!("custom cost must be zero or more, got {cost}"),
                    });
                    continue;
                }
                None => {
                    skipped.push(SkippedItem {
                        index,
                        reason: "custom item without a cost".into(),
                    });
                    continue;
                }
            },
        };
        let amount = if item.kind.rounds_up_to_step() {
            ceil_to_multiple(amount, QUOTE_STEP)
        } else {
            amount
        };

        lines.push((item.kind.category().to_string(), amount));
    }

    Ok(RenovationEstimate::from_lines(lines, contingency, skipped))
}
