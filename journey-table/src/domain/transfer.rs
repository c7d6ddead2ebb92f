//! Walking transfers outside the rail graph.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of walking connection between two stations that the journey API
/// does not model as a rail link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialTransferKind {
    /// Walk inside the paid area (e.g. Central ↔ Hong Kong).
    WalkPaid,
    /// Walk through the street, leaving the paid area (e.g. Tsim Sha Tsui ↔ East Tsim Sha Tsui).
    WalkUnpaid,
}

impl SpecialTransferKind {
    /// The tag written into the output in place of a line id.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialTransferKind::WalkPaid => "walk_paid",
            SpecialTransferKind::WalkUnpaid => "walk_unpaid",
        }
    }
}

impl fmt::Display for SpecialTransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_tags_match_display() {
        for kind in [SpecialTransferKind::WalkPaid, SpecialTransferKind::WalkUnpaid] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));

            let back: SpecialTransferKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }
}
