/// Validation state of a command record
///
/// Distinguishes "not yet checked" from "explicitly rejected". On the wire it
/// collapses to the boolean `valid`, which is true only for `Valid`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Validity {
    /// No stage has passed judgement yet
    #[default]
    Unvalidated,
    /// The most recent judging stage accepted the command
    Valid,
    /// The most recent judging stage rejected the command
    Invalid { reason: String },
}

impl Validity {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Validity::Invalid {
            reason: reason.into(),
        }
    }

    /// Boolean carried in the `valid` wire field
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }

    pub fn is_unvalidated(&self) -> bool {
        matches!(self, Validity::Unvalidated)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Validity::Invalid { .. })
    }

    /// Rejection reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            Validity::Invalid { reason } => Some(reason),
            _ => None,
        }
    }

    /// Inverse of `is_valid` for records read back from the wire
    ///
    /// `false` cannot say whether the record was rejected or never checked, so
    /// it maps to `Unvalidated`.
    pub fn from_wire(valid: bool) -> Self {
        if valid {
            Validity::Valid
        } else {
            Validity::Unvalidated
        }
    }
}
