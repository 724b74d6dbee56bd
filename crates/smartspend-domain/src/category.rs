//! Closed set of spend categories a budget can track.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Spend categories recognised by the budget registry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpendCategory {
    Shopping,
    Dining,
    Entertainment,
    Transportation,
    Groceries,
    Utilities,
    Healthcare,
    Education,
}

impl SpendCategory {
    pub const ALL: [SpendCategory; 8] = [
        SpendCategory::Shopping,
        SpendCategory::Dining,
        SpendCategory::Entertainment,
        SpendCategory::Transportation,
        SpendCategory::Groceries,
        SpendCategory::Utilities,
        SpendCategory::Healthcare,
        SpendCategory::Education,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SpendCategory::Shopping => "Shopping",
            SpendCategory::Dining => "Dining",
            SpendCategory::Entertainment => "Entertainment",
            SpendCategory::Transportation => "Transportation",
            SpendCategory::Groceries => "Groceries",
            SpendCategory::Utilities => "Utilities",
            SpendCategory::Healthcare => "Healthcare",
            SpendCategory::Education => "Education",
        }
    }

    /// Comma separated list of every label, for error messages and help text.
    pub fn options() -> String {
        Self::ALL
            .iter()
            .map(|category| category.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SpendCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a label is outside the recognised category set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown category `{}` (expected one of: {})",
            self.0,
            SpendCategory::options()
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for SpendCategory {
    type Err = UnknownCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownCategory(needle.to_string()))
    }
}
