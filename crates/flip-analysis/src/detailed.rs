use std::collections::BTreeMap;

use calc_core::{
    require_non_negative, require_positive, require_positive_count, round_cents, CalcResult,
    CostBreakdown, CostInput,
};
use mortgage_engine::interest_only_monthly;
use serde::{Deserialize, Serialize};
use transfer_tax::{compute_tax, TaxTable};

use crate::verdict::ProfitStatus;
use crate::VIABLE_PROFIT;

pub const DEFAULT_HOLDING_MONTHS: u32 = 3;

/// Financing assumptions. Anything left out falls back to the usual flip
/// structure: 20% down, 80% loan at 5%.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlipFinancing {
    pub down_payment: Option<f64>,
    pub loan_amount: Option<f64>,
    pub annual_rate_percent: Option<f64>,
    /// Lender and broker fees paid out of pocket.
    pub other_costs: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedFlipInput {
    pub purchase_price: f64,
    pub selling_price: f64,
    #[serde(default)]
    pub renovation_cost: f64,
    /// Months the property is carried before resale. Default 3.
    #[serde(default)]
    pub holding_months: Option<u32>,
    #[serde(default)]
    pub acquisition_costs: CostInput,
    #[serde(default)]
    pub holding_costs: CostInput,
    #[serde(default)]
    pub selling_costs: CostInput,
    /// Staging and marketing only apply when selling costs are estimated.
    #[serde(default)]
    pub staging_cost: Option<f64>,
    #[serde(default)]
    pub marketing_cost: Option<f64>,
    #[serde(default)]
    pub financing: Option<FlipFinancing>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlipSummary {
    pub purchase_price: f64,
    pub selling_price: f64,
    pub renovation_cost: f64,
    pub acquisition_costs: f64,
    pub holding_costs: f64,
    pub selling_costs: f64,
    pub total_costs: f64,
    pub profit: f64,
    pub total_investment: f64,
    pub roi_percent: f64,
    /// ROI scaled to a full year when the flip takes less than one.
    pub annualized_roi_percent: f64,
    pub holding_months: u32,
    pub status: ProfitStatus,
    pub is_viable: bool,
    pub message: String,
}

/// Resolved financing assumptions, echoed so the caller can see what the
/// estimate was built on.
#[derive(Debug, Clone, Serialize)]
pub struct FinancingSummary {
    pub down_payment: f64,
    pub loan_amount: f64,
    pub annual_rate_percent: f64,
    pub other_costs: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlipDetails {
    pub acquisition: CostBreakdown,
    pub holding: CostBreakdown,
    pub selling: CostBreakdown,
    pub financing: FinancingSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailedFlipResult {
    pub summary: FlipSummary,
    pub details: FlipDetails,
}

/// Full flip pro-forma. Cost blocks the caller itemizes are used as given;
/// the rest are estimated from the purchase and resale prices. The transfer
/// tax inside the estimated acquisition block uses `tax_table`, normally
/// the service's configured default.
pub fn detailed_flip(
    input: &DetailedFlipInput,
    tax_table: &TaxTable,
) -> CalcResult<DetailedFlipResult> {
    require_positive("purchase_price", input.purchase_price)?;
    require_positive("selling_price", input.selling_price)?;
    require_non_negative("renovation_cost", input.renovation_cost)?;
    let holding_months =
        require_positive_count("holding_months", input.holding_months.unwrap_or(DEFAULT_HOLDING_MONTHS))?;
    if let Some(cost) = input.staging_cost {
        require_non_negative("staging_cost", cost)?;
    }
    if let Some(cost) = input.marketing_cost {
        require_non_negative("marketing_cost", cost)?;
    }

    let financing = input.financing.clone().unwrap_or_default();
    let down_payment = match financing.down_payment {
        Some(down) => require_positive("financing.down_payment", down)?,
        None => input.purchase_price * 0.20,
    };
    let loan_amount = match financing.loan_amount {
        Some(loan) => require_positive("financing.loan_amount", loan)?,
        None => input.purchase_price * 0.80,
    };
    let annual_rate_percent = match financing.annual_rate_percent {
        Some(rate) => require_positive("financing.annual_rate_percent", rate)?,
        None => 5.0,
    };
    let other_costs = match financing.other_costs {
        Some(costs) => require_non_negative("financing.other_costs", costs)?,
        None => 0.0,
    };

    let acquisition = match &input.acquisition_costs {
        CostInput::Provided { items } => CostBreakdown::provided("acquisition_costs", items)?,
        CostInput::Default => default_acquisition(input.purchase_price, tax_table)?,
    };
    let holding = match &input.holding_costs {
        CostInput::Provided { items } => CostBreakdown::provided("holding_costs", items)?,
        CostInput::Default => default_holding(
            input.purchase_price,
            loan_amount,
            annual_rate_percent,
            holding_months,
        )?,
    };
    let selling = match &input.selling_costs {
        CostInput::Provided { items } => CostBreakdown::provided("selling_costs", items)?,
        CostInput::Default => default_selling(
            input.selling_price,
            input.staging_cost.unwrap_or(0.0),
            input.marketing_cost.unwrap_or(500.0),
        ),
    };

    let total_costs = input.purchase_price
        + input.renovation_cost
        + acquisition.total
        + holding.total
        + selling.total;
    let profit = input.selling_price - total_costs;

    let total_investment = down_payment + other_costs + input.renovation_cost;
    let roi = profit / total_investment * 100.0;
    let annualized_roi = if holding_months < 12 {
        roi * 12.0 / holding_months as f64
    } else {
        roi
    };

    let is_viable = profit >= VIABLE_PROFIT;
    let message = if is_viable {
        format!(
            "Viable: ${profit:.2} of profit over {holding_months} months, \
             {annualized_roi:.2}% annualized"
        )
    } else {
        format!("Not viable: ${profit:.2} of profit against a $25,000.00 target")
    };

    Ok(DetailedFlipResult {
        summary: FlipSummary {
            purchase_price: input.purchase_price,
            selling_price: input.selling_price,
            renovation_cost: input.renovation_cost,
            acquisition_costs: acquisition.total,
            holding_costs: holding.total,
            selling_costs: selling.total,
            total_costs: round_cents(total_costs),
            profit: round_cents(profit),
            total_investment: round_cents(total_investment),
            roi_percent: round_cents(roi),
            annualized_roi_percent: round_cents(annualized_roi),
            holding_months,
            status: ProfitStatus::from_profit(profit),
            is_viable,
            message,
        },
        details: FlipDetails {
            acquisition,
            holding,
            selling,
            financing: FinancingSummary {
                down_payment: round_cents(down_payment),
                loan_amount: round_cents(loan_amount),
                annual_rate_percent,
                other_costs: round_cents(other_costs),
            },
        },
    })
}

fn default_acquisition(purchase_price: f64, tax_table: &TaxTable) -> CalcResult<CostBreakdown> {
    let transfer_tax = compute_tax(purchase_price, tax_table)?.total_tax;
    let mut items = BTreeMap::new();
    // Notary runs about 1% of the price, capped at $1,500.
    items.insert("notary_fees".into(), f64::min(1_500.0, purchase_price * 0.01));
    items.insert("transfer_tax".into(), transfer_tax);
    items.insert("inspection".into(), 500.0);
    items.insert("title_search".into(), 300.0);
    Ok(CostBreakdown::estimated(items))
}

fn default_holding(
    purchase_price: f64,
    loan_amount: f64,
    annual_rate_percent: f64,
    months: u32,
) -> CalcResult<CostBreakdown> {
    let months = months as f64;
    let interest = interest_only_monthly(loan_amount, annual_rate_percent)? * months;
    let mut items = BTreeMap::new();
    items.insert("interest".into(), interest);
    // Property tax near 1%/year and insurance near 0.5%/year, pro-rated.
    items.insert("property_tax".into(), purchase_price * 0.01 / 12.0 * months);
    items.insert("insurance".into(), purchase_price * 0.005 / 12.0 * months);
    items.insert("utilities".into(), 200.0 * months);
    Ok(CostBreakdown::estimated(items))
}

fn default_selling(selling_price: f64, staging: f64, marketing: f64) -> CostBreakdown {
    let mut items = BTreeMap::new();
    items.insert("realtor_fees".into(), selling_price * 0.05);
    items.insert("notary_fees".into(), 1_000.0);
    items.insert("staging".into(), staging);
    items.insert("marketing".into(), marketing);
    CostBreakdown::estimated(items)
}
