//! Value kind classification.

use serde::{Serialize, Serializer};

/// Shape of the value a counter reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Unsupported / unreadable.
    Bad,
    Uint64,
    Float64,
    Float64Histogram,
}

impl ValueKind {
    /// Stable human-readable tag, used in results and error messages.
    pub fn label(self) -> &'static str {
        match self {
            ValueKind::Bad => "KindBad",
            ValueKind::Uint64 => "KindUint64",
            ValueKind::Float64 => "KindFloat64",
            ValueKind::Float64Histogram => "KindFloat64Histogram",
        }
    }
}

impl Serialize for ValueKind {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_str(self.label())
    }
}
