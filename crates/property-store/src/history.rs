//! Calculation history: write side used by the API after every calculator
//! call, read side behind the paginated history endpoint.

use anyhow::Result;
use async_trait::async_trait;
use calc_core::{CalcError, CalcResult, CalculationRecord, HistorySink};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::db::PropertyStore;
use crate::models::HistoryEntry;

#[derive(Debug, FromRow)]
struct CalculationRow {
    id: String,
    calculator: String,
    inputs: String,
    outputs: String,
    calculated_at: DateTime<Utc>,
}

impl From<CalculationRow> for HistoryEntry {
    fn from(row: CalculationRow) -> Self {
        // A row that stopped parsing degrades to null rather than hiding
        // the rest of the page.
        HistoryEntry {
            id: row.id,
            calculator: row.calculator,
            inputs: serde_json::from_str(&row.inputs).unwrap_or_default(),
            outputs: serde_json::from_str(&row.outputs).unwrap_or_default(),
            calculated_at: row.calculated_at,
        }
    }
}

impl PropertyStore {
    /// Insert one completed calculation.
    pub async fn record_calculation(&self, record: &CalculationRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO calculations (id, calculator, inputs, outputs, calculated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.calculator)
        .bind(record.inputs.to_string())
        .bind(record.outputs.to_string())
        .bind(record.calculated_at)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Most recent calculations first, optionally filtered to one
    /// calculator. `page` is 1-based.
    pub async fn recent_calculations(
        &self,
        calculator: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<HistoryEntry>> {
        let offset = (page.max(1) - 1) as i64 * per_page as i64;

        let rows: Vec<CalculationRow> = match calculator {
            Some(name) => {
                sqlx::query_as(
                    r#"
                    SELECT id, calculator, inputs, outputs, calculated_at
                    FROM calculations
                    WHERE calculator = ?
                    ORDER BY calculated_at DESC
                    LIMIT ? OFFSET ?
                    "#,
                )
                .bind(name)
                .bind(per_page as i64)
                .bind(offset)
                .fetch_all(self.pool())
                .await?
            }
            None => {
                sqlx::query_as(
                    r#"
                    SELECT id, calculator, inputs, outputs, calculated_at
                    FROM calculations
                    ORDER BY calculated_at DESC
                    LIMIT ? OFFSET ?
                    "#,
                )
                .bind(per_page as i64)
                .bind(offset)
                .fetch_all(self.pool())
                .await?
            }
        };

        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }

    pub async fn count_calculations(&self, calculator: Option<&str>) -> Result<i64> {
        let count: i64 = match calculator {
            Some(name) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM calculations WHERE calculator = ?")
                    .bind(name)
                    .fetch_one(self.pool())
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM calculations")
                    .fetch_one(self.pool())
                    .await?
            }
        };

        Ok(count)
    }
}

#[async_trait]
impl HistorySink for PropertyStore {
    async fn record(&self, record: &CalculationRecord) -> CalcResult<()> {
        self.record_calculation(record)
            .await
            .map_err(|e| CalcError::Storage(e.to_string()))
    }
}
