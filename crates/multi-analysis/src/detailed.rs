use std::collections::BTreeMap;

use calc_core::{
    require_non_negative, require_positive, require_positive_count, round_cents, CalcError,
    CalcResult, CostBreakdown, CostInput,
};
use mortgage_engine::{payment_quote, LoanTerms, PaymentFrequency};
use serde::{Deserialize, Serialize};

use crate::napkin::expense_ratio;
use crate::rating::CashflowRating;
use crate::TARGET_CASHFLOW_PER_UNIT;

pub const DEFAULT_VACANCY_PERCENT: f64 = 3.0;

/// Financing assumptions. Defaults: 20% down, 5% rate, 25-year
/// amortization, monthly payments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultiFinancing {
    pub down_payment: Option<f64>,
    pub annual_rate_percent: Option<f64>,
    pub amortization_years: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedMultiInput {
    pub purchase_price: f64,
    pub unit_count: u32,
    pub gross_annual_revenue: f64,
    /// Percent of revenue lost to vacancy and bad debt. Default 3.
    #[serde(default)]
    pub vacancy_rate_percent: Option<f64>,
    /// Default estimates expenses at the tiered PAR ratio of effective
    /// revenue.
    #[serde(default)]
    pub operating_expenses: CostInput,
    #[serde(default)]
    pub financing: Option<MultiFinancing>,
}

/// Resolved financing with the real mortgage payment behind it.
#[derive(Debug, Clone, Serialize)]
pub struct FinancingSummary {
    pub down_payment: f64,
    pub loan_amount: f64,
    pub annual_rate_percent: f64,
    pub amortization_years: u32,
    pub monthly_payment: f64,
    pub annual_debt_service: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailedMultiResult {
    pub purchase_price: f64,
    pub unit_count: u32,
    pub gross_annual_revenue: f64,
    pub vacancy_rate_percent: f64,
    pub effective_gross_revenue: f64,
    pub operating_expenses: CostBreakdown,
    pub net_operating_income: f64,
    pub financing: FinancingSummary,
    pub annual_cashflow: f64,
    pub cashflow_per_unit_per_month: f64,
    pub cap_rate_percent: f64,
    pub cash_on_cash_percent: f64,
    pub rating: CashflowRating,
    pub is_viable: bool,
    pub message: String,
}

/// Full multi pro-forma: vacancy-adjusted revenue, itemized or tiered
/// expenses, and debt service from an actual mortgage quote instead of the
/// HIGH-5 shortcut.
pub fn detailed_multi(input: &DetailedMultiInput) -> CalcResult<DetailedMultiResult> {
    require_positive("purchase_price", input.purchase_price)?;
    require_positive_count("unit_count", input.unit_count)?;
    require_non_negative("gross_annual_revenue", input.gross_annual_revenue)?;

    let vacancy = input.vacancy_rate_percent.unwrap_or(DEFAULT_VACANCY_PERCENT);
    require_non_negative("vacancy_rate_percent", vacancy)?;
    if vacancy > 100.0 {
        return Err(CalcError::invalid(format!(
            "vacancy_rate_percent must be 100 or less, got {vacancy}"
        )));
    }

    let financing = input.financing.clone().unwrap_or_default();
    let down_payment = match financing.down_payment {
        Some(down) => require_positive("financing.down_payment", down)?,
        None => input.purchase_price * 0.20,
    };
    if down_payment > input.purchase_price {
        return Err(CalcError::invalid(
            "financing.down_payment cannot exceed purchase_price".to_string(),
        ));
    }
    let annual_rate_percent = match financing.annual_rate_percent {
        Some(rate) => require_positive("financing.annual_rate_percent", rate)?,
        None => 5.0,
    };
    let amortization_years = match financing.amortization_years {
        Some(years) => require_positive_count("financing.amortization_years", years)?,
        None => 25,
    };

    let effective_revenue = input.gross_annual_revenue * (1.0 - vacancy / 100.0);

    let expenses = match &input.operating_expenses {
        CostInput::Provided { items } => CostBreakdown::provided("operating_expenses", items)?,
        CostInput::Default => {
            let ratio = expense_ratio(input.unit_count);
            let mut items = BTreeMap::new();
            items.insert(
                "operating_expenses".to_string(),
                effective_revenue * ratio,
            );
            CostBreakdown::estimated(items)
        }
    };

    let noi = effective_revenue - expenses.total;

    let loan_amount = input.purchase_price - down_payment;
    let (monthly_payment, annual_debt_service) = if loan_amount > 0.0 {
        let quote = payment_quote(&LoanTerms {
            loan_amount,
            annual_rate_percent,
            amortization_years,
            frequency: PaymentFrequency::Monthly,
        })?;
        (quote.periodic_payment, round_cents(quote.periodic_payment * 12.0))
    } else {
        // Cash purchase.
        (0.0, 0.0)
    };

    let cashflow = noi - annual_debt_service;
    let per_unit_per_month = cashflow / input.unit_count as f64 / 12.0;
    let cap_rate = noi / input.purchase_price * 100.0;
    let cash_on_cash = cashflow / down_payment * 100.0;

    let is_viable = per_unit_per_month >= TARGET_CASHFLOW_PER_UNIT;
    let message = if is_viable {
        format!(
            "Viable at ${per_unit_per_month:.2} per unit per month with debt service \
             of ${annual_debt_service:.2} a year"
        )
    } else {
        format!(
            "Below target: ${per_unit_per_month:.2} per unit per month against \
             ${TARGET_CASHFLOW_PER_UNIT:.0}"
        )
    };

    Ok(DetailedMultiResult {
        purchase_price: input.purchase_price,
        unit_count: input.unit_count,
        gross_annual_revenue: input.gross_annual_revenue,
        vacancy_rate_percent: vacancy,
        effective_gross_revenue: round_cents(effective_revenue),
        operating_expenses: expenses,
        net_operating_income: round_cents(noi),
        financing: FinancingSummary {
            down_payment: round_cents(down_payment),
            loan_amount: round_cents(loan_amount),
            annual_rate_percent,
            amortization_years,
            monthly_payment,
            annual_debt_service,
        },
        annual_cashflow: round_cents(cashflow),
        cashflow_per_unit_per_month: round_cents(per_unit_per_month),
        cap_rate_percent: round_cents(cap_rate),
        cash_on_cash_percent: round_cents(cash_on_cash),
        rating: CashflowRating::from_per_unit_per_month(per_unit_per_month),
        is_viable,
        message,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn base_input() -> DetailedMultiInput {
        DetailedMultiInput {
            purchase_price: 500_000.0,
            unit_count: 6,
            gross_annual_revenue: 60_000.0,
            vacancy_rate_percent: None,
            operating_expenses: CostInput::Default,
            financing: None,
        }
    }

    #[test]
    fn default_pro_forma_six_units() {
        let result = detailed_multi(&base_input()).unwrap();
        // 3% vacancy on 60k.
        assert_eq!(result.effective_gross_revenue, 58_200.0);
        // Six units sit in the 45% tier.
        assert_eq!(result.operating_expenses.total, 26_190.0);
        assert_eq!(result.net_operating_income, 32_010.0);
        assert_eq!(result.cap_rate_percent, 6.4);

        // Debt service matches a real monthly mortgage quote on the 400k
        // loan at the default 5% over 25 years.
        let quote = payment_quote(&LoanTerms {
            loan_amount: 400_000.0,
            annual_rate_percent: 5.0,
            amortization_years: 25,
            frequency: PaymentFrequency::Monthly,
        })
        .unwrap();
        assert_eq!(result.financing.monthly_payment, quote.periodic_payment);
        assert_eq!(
            result.financing.annual_debt_service,
            round_cents(quote.periodic_payment * 12.0)
        );

        let expected_cashflow = round_cents(32_010.0 - result.financing.annual_debt_service);
        assert_eq!(result.annual_cashflow, expected_cashflow);
        // Around $55/unit/month: good but under the $75 bar.
        assert_eq!(result.rating, CashflowRating::Good);
        assert!(!result.is_viable);
    }

    #[test]
    fn cash_purchase_has_no_debt_service() {
        let mut input = base_input();
        input.financing = Some(MultiFinancing {
            down_payment: Some(500_000.0),
            annual_rate_percent: None,
            amortization_years: None,
        });
        let result = detailed_multi(&input).unwrap();
        assert_eq!(result.financing.loan_amount, 0.0);
        assert_eq!(result.financing.annual_debt_service, 0.0);
        assert_eq!(result.annual_cashflow, result.net_operating_income);
        // All-cash cashflow per unit: 32,010 / 6 / 12.
        assert_eq!(result.cashflow_per_unit_per_month, 444.58);
        assert!(result.is_viable);
    }

    #[test]
    fn provided_expenses_override_the_tier() {
        let mut input = base_input();
        input.operating_expenses = CostInput::Provided {
            items: [
                ("taxes".to_string(), 9_000.0),
                ("insurance".to_string(), 3_000.0),
                ("maintenance".to_string(), 6_000.0),
            ]
            .into_iter()
            .collect(),
        };
        let result = detailed_multi(&input).unwrap();
        assert_eq!(result.operating_expenses.total, 18_000.0);
        assert_eq!(result.operating_expenses.source, "provided");
        assert_eq!(result.net_operating_income, 40_200.0);
    }

    #[test]
    fn vacancy_bounds_are_enforced() {
        let mut input = base_input();
        input.vacancy_rate_percent = Some(101.0);
        assert!(detailed_multi(&input).is_err());
        input.vacancy_rate_percent = Some(-1.0);
        assert!(detailed_multi(&input).is_err());
        // Zero vacancy is allowed.
        input.vacancy_rate_percent = Some(0.0);
        let result = detailed_multi(&input).unwrap();
        assert_eq!(result.effective_gross_revenue, 60_000.0);
    }

    #[test]
    fn down_payment_above_price_is_rejected() {
        let mut input = base_input();
        input.financing = Some(MultiFinancing {
            down_payment: Some(600_000.0),
            annual_rate_percent: None,
            amortization_years: None,
        });
        assert!(detailed_multi(&input).is_err());
    }
}
