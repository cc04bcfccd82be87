use calc_core::{
    floor_to_multiple, require_non_negative, require_positive, require_positive_count, round_cents,
    CalcResult,
};
use serde::Serialize;

use crate::rating::CashflowRating;
use crate::TARGET_CASHFLOW_PER_UNIT;

/// HIGH-5 shortcut: annual debt service approximated as 0.5% of the
/// purchase price per month.
const HIGH_5_ANNUAL_FACTOR: f64 = 0.005 * 12.0;

/// Share of gross revenue eaten by operating expenses, by building size.
/// Small plexes run lean; past six units the rule of thumb is half.
pub fn expense_ratio(unit_count: u32) -> f64 {
    if unit_count <= 2 {
        0.30
    } else if unit_count <= 4 {
        0.35
    } else if unit_count <= 6 {
        0.45
    } else {
        0.50
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NapkinMultiResult {
    pub purchase_price: f64,
    pub unit_count: u32,
    pub gross_annual_revenue: f64,
    pub expense_ratio_percent: f64,
    pub operating_expenses: f64,
    pub net_operating_income: f64,
    /// HIGH-5 debt service estimate for the year.
    pub annual_debt_service: f64,
    pub annual_cashflow: f64,
    pub cashflow_per_unit_per_month: f64,
    /// Cash return on the assumed 20% down payment.
    pub annual_roi_percent: f64,
    pub target_cashflow_per_month: f64,
    pub target_cashflow_per_year: f64,
    pub rating: CashflowRating,
    pub is_viable: bool,
    pub message: String,
}

/// PAR napkin cashflow for a rental building.
pub fn napkin_cashflow(
    purchase_price: f64,
    unit_count: u32,
    gross_annual_revenue: f64,
) -> CalcResult<NapkinMultiResult> {
    require_positive("purchase_price", purchase_price)?;
    require_positive_count("unit_count", unit_count)?;
    require_non_negative("gross_annual_revenue", gross_annual_revenue)?;

    let ratio = expense_ratio(unit_count);
    let operating_expenses = gross_annual_revenue * ratio;
    let noi = gross_annual_revenue - operating_expenses;
    let debt_service = purchase_price * HIGH_5_ANNUAL_FACTOR;
    let cashflow = noi - debt_service;
    let per_unit_per_month = cashflow / unit_count as f64 / 12.0;

    let down_payment = purchase_price * 0.20;
    let roi = cashflow / down_payment * 100.0;

    let is_viable = per_unit_per_month >= TARGET_CASHFLOW_PER_UNIT;
    let message = if is_viable {
        format!(
            "Viable at ${per_unit_per_month:.2} per unit per month (target \
             ${TARGET_CASHFLOW_PER_UNIT:.0})"
        )
    } else {
        format!(
            "Below target: ${per_unit_per_month:.2} per unit per month against \
             ${TARGET_CASHFLOW_PER_UNIT:.0}"
        )
    };

    Ok(NapkinMultiResult {
        purchase_price,
        unit_count,
        gross_annual_revenue,
        expense_ratio_percent: ratio * 100.0,
        operating_expenses: round_cents(operating_expenses),
        net_operating_income: round_cents(noi),
        annual_debt_service: round_cents(debt_service),
        annual_cashflow: round_cents(cashflow),
        cashflow_per_unit_per_month: round_cents(per_unit_per_month),
        annual_roi_percent: round_cents(roi),
        target_cashflow_per_month: TARGET_CASHFLOW_PER_UNIT * unit_count as f64,
        target_cashflow_per_year: TARGET_CASHFLOW_PER_UNIT * unit_count as f64 * 12.0,
        rating: CashflowRating::from_per_unit_per_month(per_unit_per_month),
        is_viable,
        message,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct MaxPurchaseResult {
    pub unit_count: u32,
    pub gross_annual_revenue: f64,
    pub expense_ratio_percent: f64,
    pub operating_expenses: f64,
    pub net_operating_income: f64,
    pub target_cashflow_per_unit: f64,
    pub target_annual_cashflow: f64,
    /// Highest price at which the target cashflow still holds. Zero when
    /// revenue cannot cover it at any price.
    pub max_purchase_price: f64,
    /// Max price floored to the nearest $10,000 for an opening offer.
    pub strategic_offer: f64,
    pub is_viable: bool,
    pub message: String,
}

/// HIGH-5 inverted: the highest purchase price that leaves the target
/// cashflow per unit (default $75/month).
pub fn max_purchase_price(
    unit_count: u32,
    gross_annual_revenue: f64,
    target_cashflow_per_unit: Option<f64>,
) -> CalcResult<MaxPurchaseResult> {
    require_positive_count("unit_count", unit_count)?;
    require_non_negative("gross_annual_revenue", gross_annual_revenue)?;
    let target = target_cashflow_per_unit.unwrap_or(TARGET_CASHFLOW_PER_UNIT);
    require_non_negative("target_cashflow_per_unit", target)?;

    let ratio = expense_ratio(unit_count);
    let operating_expenses = gross_annual_revenue * ratio;
    let noi = gross_annual_revenue - operating_expenses;
    let target_annual = target * unit_count as f64 * 12.0;
    let available_for_debt = noi - target_annual;

    if available_for_debt <= 0.0 {
        return Ok(MaxPurchaseResult {
            unit_count,
            gross_annual_revenue,
            expense_ratio_percent: ratio * 100.0,
            operating_expenses: round_cents(operating_expenses),
            net_operating_income: round_cents(noi),
            target_cashflow_per_unit: target,
            target_annual_cashflow: target_annual,
            max_purchase_price: 0.0,
            strategic_offer: 0.0,
            is_viable: false,
            message: "Revenue cannot cover the target cashflow at any purchase price".into(),
        });
    }

    let max_price = available_for_debt / HIGH_5_ANNUAL_FACTOR;
    let strategic_offer = floor_to_multiple(max_price, 10_000.0);

    Ok(MaxPurchaseResult {
        unit_count,
        gross_annual_revenue,
        expense_ratio_percent: ratio * 100.0,
        operating_expenses: round_cents(operating_expenses),
        net_operating_income: round_cents(noi),
        target_cashflow_per_unit: target,
        target_annual_cashflow: target_annual,
        max_purchase_price: round_cents(max_price),
        strategic_offer,
        is_viable: true,
        message: format!(
            "Stay at or below ${max_price:.2} to keep ${target:.0} per unit per month; \
             ${strategic_offer:.0} makes a clean opening offer"
        ),
    })
}
