use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ValidationError;

/// Inventory category accepted by the recommendation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vegetable,
    Fruit,
    Dairy,
    Meat,
    Frozen,
    Grains,
    Nuts,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Vegetable,
        Category::Fruit,
        Category::Dairy,
        Category::Meat,
        Category::Frozen,
        Category::Grains,
        Category::Nuts,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vegetable => "vegetable",
            Category::Fruit => "fruit",
            Category::Dairy => "dairy",
            Category::Meat => "meat",
            Category::Frozen => "frozen",
            Category::Grains => "grains",
            Category::Nuts => "nuts",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ValidationError::UnknownCategory(needle.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Dairy".parse::<Category>().unwrap(), Category::Dairy);
        assert_eq!(" NUTS ".parse::<Category>().unwrap(), Category::Nuts);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "seafood".parse::<Category>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownCategory("seafood".to_string()));
    }

    #[test]
    fn test_wire_name_round_trips_display() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category));
        }
    }
}
