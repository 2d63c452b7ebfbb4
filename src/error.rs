/// A convenient type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur while building or validating an automaton.
///
/// Scanning never fails, every error is reported before the first symbol is
/// read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The same pattern id was given to two different patterns.
    #[error("pattern id {id} is already assigned to a different pattern")]
    ConflictingPatternId {
        /// The reused id.
        id: usize,
    },

    /// A compiled automaton does not hold one of its structural invariants.
    ///
    /// Automatons built by this crate always hold them, this is only returned
    /// when validating an automaton from elsewhere, e.g. a deserialized one.
    #[error("automaton invariant violated at state {state}: {reason}")]
    Invariant {
        /// The state where the violation was found.
        state: usize,
        /// What was violated.
        reason: &'static str,
    },
}

impl Error {
    pub(crate) fn invariant(state: usize, reason: &'static str) -> Self {
        Self::Invariant { state, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::ConflictingPatternId { id: 3 };
        assert_eq!(
            err.to_string(),
            "pattern id 3 is already assigned to a different pattern"
        );
        let err = Error::invariant(7, "transition out of range");
        assert_eq!(
            err.to_string(),
            "automaton invariant violated at state 7: transition out of range"
        );
    }
}
