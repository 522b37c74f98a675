use serde::{Deserialize, Serialize};
use std::fmt;

/// Row identifier, unique within one row collection.
///
/// Generated rows get numeric ids from an [`IdSequence`]; imported rows keep
/// whatever id the exchange snapshot carried.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct RowId(pub String);

impl RowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<u64> for RowId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<RowId> for String {
    fn from(id: RowId) -> Self {
        id.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Exchange snapshots carry numeric ids, grid exports carry strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl From<RawId> for RowId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self::from(n),
        }
    }
}

/// Caller-owned id counter threaded through every row-creating call.
///
/// Two sequences started at the same value hand out the same ids, so ladder
/// generation is reproducible without process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    pub fn next_id(&mut self) -> RowId {
        let id = RowId::from(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to [`next_id`](Self::next_id) will return.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequences_are_deterministic() {
        let mut a = IdSequence::new();
        let mut b = IdSequence::new();
        for _ in 0..5 {
            assert_eq!(a.next_id(), b.next_id());
        }
        assert_eq!(a.peek(), 6);
    }

    #[test]
    fn sequence_can_resume_after_existing_rows() {
        let mut ids = IdSequence::starting_at(42);
        assert_eq!(ids.next_id(), RowId::new("42"));
        assert_eq!(ids.next_id(), RowId::new("43"));
    }

    #[test]
    fn deserializes_numeric_and_string_ids() {
        let a: RowId = serde_json::from_str("17").unwrap();
        let b: RowId = serde_json::from_str("\"exit1\"").unwrap();
        assert_eq!(a, RowId::new("17"));
        assert_eq!(b, RowId::new("exit1"));
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"17\"");
    }
}
