use calc_core::{
    floor_to_multiple, require_non_negative, require_positive, round_cents, CalcResult,
};
use serde::Serialize;

use crate::verdict::ProfitStatus;
use crate::VIABLE_PROFIT;

#[derive(Debug, Clone, Serialize)]
pub struct NapkinFlipResult {
    pub final_price: f64,
    pub initial_price: f64,
    pub renovation_cost: f64,
    /// 10% of the resale price, reserved for transaction costs.
    pub ten_percent_reserve: f64,
    pub profit: f64,
    /// Return on the assumed 20% down payment.
    pub roi_percent: f64,
    pub status: ProfitStatus,
    pub is_viable: bool,
    pub message: String,
}

/// FIP10 napkin profit: resale minus purchase, renovations and the 10%
/// reserve.
pub fn napkin_profit(
    final_price: f64,
    initial_price: f64,
    renovation_cost: f64,
) -> CalcResult<NapkinFlipResult> {
    require_positive("final_price", final_price)?;
    require_positive("initial_price", initial_price)?;
    require_non_negative("renovation_cost", renovation_cost)?;

    let reserve = final_price * 0.10;
    let profit = final_price - initial_price - renovation_cost - reserve;
    let down_payment = initial_price * 0.20;
    let roi = profit / down_payment * 100.0;
    let is_viable = profit > VIABLE_PROFIT;

    let message = if is_viable {
        format!("Estimated profit of ${profit:.2} clears the $25,000 target")
    } else {
        format!("Estimated profit of ${profit:.2} falls short of the $25,000 target")
    };

    Ok(NapkinFlipResult {
        final_price,
        initial_price,
        renovation_cost,
        ten_percent_reserve: round_cents(reserve),
        profit: round_cents(profit),
        roi_percent: round_cents(roi),
        status: ProfitStatus::from_profit(profit),
        is_viable,
        message,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct NapkinOfferResult {
    pub final_price: f64,
    pub renovation_cost: f64,
    pub ten_percent_reserve: f64,
    pub desired_profit: f64,
    /// Highest purchase price that still leaves the desired profit.
    pub max_offer: f64,
    /// Max offer floored to the nearest $1,000 for the negotiation table.
    pub strategic_offer: f64,
    pub is_viable: bool,
    pub message: String,
}

/// FIP10 solved for the purchase price: what to offer so the flip still
/// returns `desired_profit` (default $25,000).
pub fn napkin_offer(
    final_price: f64,
    renovation_cost: f64,
    desired_profit: Option<f64>,
) -> CalcResult<NapkinOfferResult> {
    require_positive("final_price", final_price)?;
    require_non_negative("renovation_cost", renovation_cost)?;
    let desired_profit = desired_profit.unwrap_or(VIABLE_PROFIT);
    require_positive("desired_profit", desired_profit)?;

    let reserve = final_price * 0.10;
    let max_offer = final_price - renovation_cost - reserve - desired_profit;

    if max_offer <= 0.0 {
        return Ok(NapkinOfferResult {
            final_price,
            renovation_cost,
            ten_percent_reserve: round_cents(reserve),
            desired_profit,
            max_offer: 0.0,
            strategic_offer: 0.0,
            is_viable: false,
            message: format!(
                "No workable offer: renovations, the 10% reserve and a ${desired_profit:.2} \
                 profit already exceed the resale price"
            ),
        });
    }

    let strategic_offer = floor_to_multiple(max_offer, 1_000.0);

    Ok(NapkinOfferResult {
        final_price,
        renovation_cost,
        ten_percent_reserve: round_cents(reserve),
        desired_profit,
        max_offer: round_cents(max_offer),
        strategic_offer,
        is_viable: true,
        message: format!(
            "Offer up to ${max_offer:.2} to keep ${desired_profit:.2} of profit; \
             ${strategic_offer:.0} makes a clean opening number"
        ),
    })
}
