//! Lost/found item type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether an item was reported as lost or found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "item_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// The poster lost this item and is looking for it.
    Lost,
    /// The poster found this item and is looking for its owner.
    Found,
}

impl ItemType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lost => "lost",
            Self::Found => "found",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = reclaim_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lost" => Ok(Self::Lost),
            "found" => Ok(Self::Found),
            _ => Err(reclaim_core::AppError::validation(format!(
                "Invalid item type: '{s}'. Expected 'lost' or 'found'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("lost".parse::<ItemType>().unwrap(), ItemType::Lost);
        assert_eq!("FOUND".parse::<ItemType>().unwrap(), ItemType::Found);
        assert!("stolen".parse::<ItemType>().is_err());
    }
}
