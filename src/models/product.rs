//! Product (SKU) model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A sellable product.
///
/// Immutable reference data. The packaging family decides which packaging
/// line a batch ends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSku {
    /// Unique SKU identifier.
    pub id: u32,
    /// Display name (e.g., "IPA - 330ml Can").
    pub name: String,
    /// Brand label.
    pub brand: String,
    /// Tasting note shown alongside the brand.
    #[serde(default)]
    pub flavor: String,
    /// Packaging family.
    pub family: PackagingFamily,
}

/// Packaging family of a SKU and of the line that fills it.
///
/// The declaration order is the order the scheduler clusters demand in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PackagingFamily {
    Can,
    Keg,
    Bottle,
}

impl ProductSku {
    /// Creates a new SKU.
    pub fn new(id: u32, name: impl Into<String>, family: PackagingFamily) -> Self {
        Self {
            id,
            name: name.into(),
            brand: String::new(),
            flavor: String::new(),
            family,
        }
    }

    /// Sets the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Sets the flavor note.
    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = flavor.into();
        self
    }
}

impl PackagingFamily {
    /// Family name as shown to operators.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Can => "Can",
            Self::Keg => "Keg",
            Self::Bottle => "Bottle",
        }
    }
}

impl fmt::Display for PackagingFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
