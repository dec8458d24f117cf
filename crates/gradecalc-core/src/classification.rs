//! UK-style degree classification bands.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Five-band classification of a final grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    First,
    UpperSecond,
    LowerSecond,
    Third,
    Fail,
}

impl Classification {
    /// Bands from highest to lowest.
    pub const ALL: [Classification; 5] = [
        Classification::First,
        Classification::UpperSecond,
        Classification::LowerSecond,
        Classification::Third,
        Classification::Fail,
    ];

    /// Lowest grade that earns this band.
    pub fn boundary(self) -> f64 {
        match self {
            Classification::First => 70.0,
            Classification::UpperSecond => 60.0,
            Classification::LowerSecond => 50.0,
            Classification::Third => 40.0,
            Classification::Fail => 0.0,
        }
    }

    pub fn from_grade(grade: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| grade >= c.boundary())
            .unwrap_or(Classification::Fail)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::First => write!(f, "First"),
            Classification::UpperSecond => write!(f, "2:1"),
            Classification::LowerSecond => write!(f, "2:2"),
            Classification::Third => write!(f, "Third"),
            Classification::Fail => write!(f, "Fail"),
        }
    }
}

impl FromStr for Classification {
    type Err = String;

    /// Accepts a band name ("first", "2:1", ...) or its boundary ("70").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" | "1st" | "70" => Ok(Classification::First),
            "2:1" | "upper-second" | "60" => Ok(Classification::UpperSecond),
            "2:2" | "lower-second" | "50" => Ok(Classification::LowerSecond),
            "third" | "3rd" | "40" => Ok(Classification::Third),
            "fail" => Ok(Classification::Fail),
            other => Err(format!("unknown classification: {other}")),
        }
    }
}

/// Display label for an optional grade, `—` when undefined.
pub fn classify(grade: Option<f64>) -> String {
    grade.map_or_else(|| "—".to_string(), |g| Classification::from_grade(g).to_string())
}
