use serde::Serialize;

/// One progressive bracket. `upper_bound: None` means the bracket is open
/// ended and absorbs everything above the previous bound.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TaxBracket {
    pub upper_bound: Option<f64>,
    /// Rate as a fraction, e.g. 0.005 for 0.5%.
    pub rate: f64,
}

impl TaxBracket {
    const fn to(upper_bound: f64, rate: f64) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    const fn above(rate: f64) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

/// A named, versioned bracket table.
#[derive(Debug, Clone, Serialize)]
pub struct TaxTable {
    pub name: &'static str,
    pub label: &'static str,
    pub brackets: Vec<TaxBracket>,
}

impl TaxTable {
    /// The commonly quoted Québec schedule, used by most municipalities.
    pub fn quebec_standard() -> Self {
        Self {
            name: "quebec-standard",
            label: "Québec standard brackets",
            brackets: vec![
                TaxBracket::to(50_000.0, 0.005),
                TaxBracket::to(250_000.0, 0.01),
                TaxBracket::to(500_000.0, 0.015),
                TaxBracket::to(1_000_000.0, 0.02),
                TaxBracket::above(0.025),
            ],
        }
    }

    /// Québec City caps out at 2% instead of adding brackets past $500k.
    pub fn quebec_city() -> Self {
        Self {
            name: "quebec-city",
            label: "Québec City brackets",
            brackets: vec![
                TaxBracket::to(50_000.0, 0.005),
                TaxBracket::to(250_000.0, 0.01),
                TaxBracket::to(500_000.0, 0.015),
                TaxBracket::above(0.02),
            ],
        }
    }

    /// Provincially indexed bounds for 2024.
    pub fn quebec_indexed_2024() -> Self {
        Self {
            name: "quebec-indexed-2024",
            label: "Québec brackets, 2024 indexation",
            brackets: vec![
                TaxBracket::to(51_700.0, 0.005),
                TaxBracket::to(258_600.0, 0.01),
                TaxBracket::above(0.015),
            ],
        }
    }

    /// Every table this build knows about, for listing endpoints.
    pub fn all() -> Vec<TaxTable> {
        vec![
            TaxTable::quebec_standard(),
            TaxTable::quebec_city(),
            TaxTable::quebec_indexed_2024(),
        ]
    }

    pub fn for_name(name: &str) -> Option<TaxTable> {
        TaxTable::all().into_iter().find(|t| t.name == name)
    }

    /// Table used by a municipality. Unrecognized municipalities get the
    /// standard schedule; the result echoes the table name so callers can
    /// tell which one applied.
    pub fn for_municipality(municipality: &str) -> TaxTable {
        match municipality {
            "Québec" | "Quebec" => TaxTable::quebec_city(),
            "Montréal" | "Montreal" | "Laval" => TaxTable::quebec_standard(),
            _ => TaxTable::quebec_standard(),
        }
    }
}
