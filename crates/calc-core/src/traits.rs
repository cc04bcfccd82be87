use async_trait::async_trait;

use crate::error::CalcResult;
use crate::types::CalculationRecord;

/// Destination for completed calculations.
///
/// The API server records every successful calculator call through this
/// trait. Persistence is optional at runtime, so failures here must never
/// fail the calculation itself; callers log and move on.
#[async_trait]
pub trait HistorySink: Send + Sync {
    async fn record(&self, record: &CalculationRecord) -> CalcResult<()>;
}
