use calc_core::{require_non_negative, round_cents, round_dollars, CalcResult};
use serde::Serialize;

use crate::tables::TaxTable;

/// One bracket's slice of the bill, for itemized display.
#[derive(Debug, Clone, Serialize)]
pub struct BracketLine {
    pub from: f64,
    pub to: f64,
    pub rate_percent: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferTaxResult {
    pub property_value: f64,
    /// Name of the bracket table that produced this bill.
    pub table: &'static str,
    /// Total tax, rounded to the dollar.
    pub total_tax: f64,
    pub brackets: Vec<BracketLine>,
}

/// Walk the table's brackets over the property value, taxing each slice at
/// its bracket rate. Only brackets the value actually reaches show up in
/// the breakdown.
pub fn compute_tax(property_value: f64, table: &TaxTable) -> CalcResult<TransferTaxResult> {
    require_non_negative("property_value", property_value)?;

    let mut remaining = property_value;
    let mut previous_bound = 0.0;
    let mut total = 0.0;
    let mut lines = Vec::new();

    for bracket in &table.brackets {
        if remaining <= 0.0 {
            break;
        }
        let slice = match bracket.upper_bound {
            Some(bound) => remaining.min(bound - previous_bound),
            None => remaining,
        };
        let amount = slice * bracket.rate;
        total += amount;

        lines.push(BracketLine {
            from: previous_bound,
            to: previous_bound + slice,
            rate_percent: bracket.rate * 100.0,
            amount: round_cents(amount),
        });

        remaining -= slice;
        if let Some(bound) = bracket.upper_bound {
            previous_bound = bound;
        }
    }

    Ok(TransferTaxResult {
        property_value,
        table: table.name,
        total_tax: round_dollars(total),
        brackets: lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_on_300k() {
        let result = compute_tax(300_000.0, &TaxTable::quebec_standard()).unwrap();
        // 50k at 0.5% + 200k at 1% + 50k at 1.5% = 250 + 2000 + 750.
        assert_eq!(result.total_tax, 3_000.0);
        assert_eq!(result.table, "quebec-standard");
        assert_eq!(result.brackets.len(), 3);
        assert_eq!(result.brackets[0].amount, 250.0);
        assert_eq!(result.brackets[1].amount, 2_000.0);
        assert_eq!(result.brackets[2].amount, 750.0);
        assert_eq!(result.brackets[2].to, 300_000.0);
    }

    #[test]
    fn indexed_table_on_300k() {
        let result = compute_tax(300_000.0, &TaxTable::quebec_indexed_2024()).unwrap();
        // 51,700 at 0.5% + 206,900 at 1% + 41,400 at 1.5% = 2,948.50 -> 2,949.
        assert_eq!(result.total_tax, 2_949.0);
        assert_eq!(result.table, "quebec-indexed-2024");
    }

    #[test]
    fn value_inside_first_bracket() {
        let result = compute_tax(40_000.0, &TaxTable::quebec_standard()).unwrap();
        assert_eq!(result.total_tax, 200.0);
        assert_eq!(result.brackets.len(), 1);
        assert_eq!(result.brackets[0].to, 40_000.0);
    }

    #[test]
    fn value_exactly_on_a_bound_does_not_open_the_next_bracket() {
        let result = compute_tax(50_000.0, &TaxTable::quebec_standard()).unwrap();
        assert_eq!(result.total_tax, 250.0);
        assert_eq!(result.brackets.len(), 1);
    }

    #[test]
    fn open_bracket_absorbs_large_values() {
        let result = compute_tax(1_500_000.0, &TaxTable::quebec_standard()).unwrap();
        // 250 + 2000 + 3750 + 10000 + 500k at 2.5% = 12500 -> 28,500 total.
        assert_eq!(result.total_tax, 28_500.0);
        assert_eq!(result.brackets.len(), 5);
        let last = result.brackets.last().unwrap();
        assert_eq!(last.from, 1_000_000.0);
        assert_eq!(last.to, 1_500_000.0);
        assert_eq!(last.amount, 12_500.0);
    }

    #[test]
    fn quebec_city_caps_at_two_percent() {
        let standard = compute_tax(800_000.0, &TaxTable::quebec_standard()).unwrap();
        let city = compute_tax(800_000.0, &TaxTable::quebec_city()).unwrap();
        assert_eq!(city.total_tax, standard.total_tax);
        // Past $1M the standard table pulls ahead.
        let standard = compute_tax(1_200_000.0, &TaxTable::quebec_standard()).unwrap();
        let city = compute_tax(1_200_000.0, &TaxTable::quebec_city()).unwrap();
        assert!(city.total_tax < standard.total_tax);
    }

    /// Closed form of the standard table, for cross-checking the walk.
    fn standard_closed_form(value: f64) -> f64 {
        if value <= 50_000.0 {
            value * 0.005
        } else if value <= 250_000.0 {
            250.0 + (value - 50_000.0) * 0.01
        } else if value <= 500_000.0 {
            2_250.0 + (value - 250_000.0) * 0.015
        } else if value <= 1_000_000.0 {
            6_000.0 + (value - 500_000.0) * 0.02
        } else {
            16_000.0 + (value - 1_000_000.0) * 0.025
        }
    }

    #[test]
    fn bracket_walk_matches_the_closed_form() {
        let table = TaxTable::quebec_standard();
        for value in [0.0, 50_000.0, 250_000.0, 1_000_000.0, 2_000_000.0] {
            let result = compute_tax(value, &table).unwrap();
            assert_eq!(result.total_tax, standard_closed_form(value).round());

            let line_sum: f64 = result.brackets.iter().map(|line| line.amount).sum();
            assert!((line_sum - result.total_tax).abs() < 1.0);
        }
    }

    #[test]
    fn zero_value_is_zero_tax() {
        let result = compute_tax(0.0, &TaxTable::quebec_standard()).unwrap();
        assert_eq!(result.total_tax, 0.0);
        assert!(result.brackets.is_empty());
    }

    #[test]
    fn negative_value_is_rejected() {
        assert!(compute_tax(-10.0, &TaxTable::quebec_standard()).is_err());
    }
}
