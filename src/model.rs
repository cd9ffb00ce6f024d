use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MenuError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealPeriod {
    /// Only produced when breakfast is tracked as its own period; otherwise
    /// breakfast specials are filed under lunch.
    Breakfast,
    Lunch,
    Dinner,
}

impl MealPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            MealPeriod::Breakfast => "breakfast",
            MealPeriod::Lunch => "lunch",
            MealPeriod::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealPeriod::Breakfast),
            "lunch" => Ok(MealPeriod::Lunch),
            "dinner" => Ok(MealPeriod::Dinner),
            other => Err(format!("unknown meal period: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub meal: MealPeriod,
}

/// Items recovered from one document, plus the blocks that could not be read.
#[derive(Debug, Default)]
pub struct ParsedMenu {
    pub items: Vec<MenuItem>,
    pub defects: Vec<MenuError>,
}

/// Everything produced for a single source document.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedMenu {
    pub id: String,
    pub items: Vec<MenuItem>,
    pub defects: Vec<String>,
    #[serde(skip)]
    pub clean_text: String,
    #[serde(skip)]
    pub formatted: String,
    pub processed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_period_parses_case_insensitively() {
        assert_eq!("Dinner".parse::<MealPeriod>(), Ok(MealPeriod::Dinner));
        assert_eq!(" lunch ".parse::<MealPeriod>(), Ok(MealPeriod::Lunch));
        assert!("brunch".parse::<MealPeriod>().is_err());
    }

    #[test]
    fn meal_period_serializes_lowercase() {
        let json = serde_json::to_string(&MealPeriod::Breakfast).unwrap();
        assert_eq!(json, "\"breakfast\"");
    }
}
