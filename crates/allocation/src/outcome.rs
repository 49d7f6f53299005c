//! Structured processing results, aggregated explicitly by the orchestrator
//! instead of error flags scattered over shared entities.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockyard_core::ValidationErrors;
use stockyard_warehouse::{Document, Position};

use crate::shortfall::ShortfallReport;

/// Result of processing one request line. Fatal failures are not represented
/// here; those abort the whole document as an `AllocationError`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LineResult {
    /// The line was satisfied; one result position per lot drawn from (or the
    /// rewritten line itself for receipts and transfers).
    Fulfilled { positions: Vec<Position> },
    /// Not enough stock. The line stays unchanged and the document-level
    /// shortfall report carries the deficit.
    Shortfall { requested: Decimal },
    /// A destination lot was rejected by the store during a transfer; the
    /// field errors are surfaced on the line.
    Rejected { errors: ValidationErrors },
}

impl LineResult {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, LineResult::Fulfilled { .. })
    }
}

/// Outcome of processing a whole document.
///
/// The document comes back with its positions rewritten (replaced by result
/// lines on a multi-lot draw, updated in place on a single-lot draw). A
/// document with any unfulfilled line is invalid as a whole; callers are
/// expected to roll back the enclosing transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutcome {
    pub document: Document,
    pub lines: Vec<LineResult>,
    pub shortfall: Option<ShortfallReport>,
}

impl DocumentOutcome {
    pub fn is_valid(&self) -> bool {
        self.lines.iter().all(LineResult::is_fulfilled)
    }
}
