use serde::{Deserialize, Serialize};

/// Measurement unit for an inventory quantity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Gram,
    Kilogram,
    Liter,
    Milliliter,
    Piece,
    Cup,
    Tablespoon,
    Teaspoon,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Gram => "gram",
            Unit::Kilogram => "kilogram",
            Unit::Liter => "liter",
            Unit::Milliliter => "milliliter",
            Unit::Piece => "piece",
            Unit::Cup => "cup",
            Unit::Tablespoon => "tablespoon",
            Unit::Teaspoon => "teaspoon",
        }
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
