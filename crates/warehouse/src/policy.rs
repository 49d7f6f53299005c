use serde::{Deserialize, Serialize};

use stockyard_core::DomainError;

/// Lot selection order used when a warehouse consumes stock.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationPolicy {
    /// Oldest receipt first.
    Fifo,
    /// Newest receipt first.
    Lifo,
    /// Soonest expiration first.
    Fefo,
    /// Latest expiration first.
    Lefo,
    /// The request line names the lot to draw from.
    Manual,
}

impl AllocationPolicy {
    /// Parse the warehouse algorithm code stored on a location.
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        match code.to_ascii_lowercase().as_str() {
            "fifo" => Ok(Self::Fifo),
            "lifo" => Ok(Self::Lifo),
            "fefo" => Ok(Self::Fefo),
            "lefo" => Ok(Self::Lefo),
            "manual" => Ok(Self::Manual),
            other => Err(DomainError::validation(format!(
                "unknown warehouse algorithm: {other}"
            ))),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Fifo => "fifo",
            Self::Lifo => "lifo",
            Self::Fefo => "fefo",
            Self::Lefo => "lefo",
            Self::Manual => "manual",
        }
    }
}

impl core::fmt::Display for AllocationPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}
