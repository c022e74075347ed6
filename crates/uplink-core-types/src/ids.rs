//! Identity types for command metadata
//!
//! A `CommandUid` groups every record produced for the same logical command.
//! One-shot commands get their own uid; the sub-commands of a CL script share
//! one.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier shared by sibling command records
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandUid(String);

impl CommandUid {
    /// Generate a new random CommandUid using UUIDv4 (122 random bits)
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for unmarshalling)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    /// Consume the uid and return the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for CommandUid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CommandUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Return a fresh, globally unique command identifier
pub fn new_unique_id() -> CommandUid {
    CommandUid::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_command_uid_generation() {
        let id1 = CommandUid::new();
        let id2 = CommandUid::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
        assert!(!id2.as_str().is_empty());
    }

    #[test]
    fn test_command_uid_is_uuid_v4() {
        let id = new_unique_id();
        let parsed = Uuid::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_command_uid_display() {
        let id = CommandUid::new();
        assert_eq!(format!("{}", id), id.as_str());
    }

    #[test]
    fn test_ten_thousand_uids_are_distinct() {
        let ids: HashSet<CommandUid> = (0..10_000).map(|_| new_unique_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_serialization_is_a_plain_string() {
        let id = CommandUid::from_string("abc-123".to_string());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc-123\"");

        let deserialized: CommandUid = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
