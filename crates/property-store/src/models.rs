use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of property the registry accepts; mirrored by a CHECK constraint
/// in the schema.
pub const PROPERTY_TYPES: &[&str] = &["FLIP", "MULTI", "PLEX", "RESIDENTIAL", "COMMERCIAL", "LAND"];

/// Investment strategies a project can follow.
pub const PROJECT_STRATEGIES: &[&str] = &["FLIP", "MULTI"];

/// Lifecycle stages of a project, from first look to done (or dropped).
pub const PROJECT_STATUSES: &[&str] = &[
    "RESEARCH",
    "NEGOTIATION",
    "FINANCING",
    "ACQUISITION",
    "RENOVATION",
    "RENTING",
    "SELLING",
    "COMPLETED",
    "ABANDONED",
];

pub const DEFAULT_PROJECT_STATUS: &str = "RESEARCH";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Property {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub property_type: String,
    pub unit_count: Option<i64>,
    pub asking_price: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating or replacing a property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyInput {
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub property_type: String,
    pub unit_count: Option<i64>,
    pub asking_price: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: String,
    pub property_id: String,
    pub name: String,
    pub strategy: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating or replacing a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInput {
    pub name: String,
    pub strategy: String,
    /// Defaults to RESEARCH when absent.
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// One saved calculation, read back from history.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    pub calculator: String,
    pub inputs: serde_json::Value,
    pub outputs: serde_json::Value,
    pub calculated_at: DateTime<Utc>,
}
