//! Domain error types.
//!
//! These errors describe journey records that cannot be turned into a
//! path. They are distinct from fetch/IO errors.

use super::StationId;

/// Domain-level errors raised while resolving stations and building paths.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// The journey API referenced an id the station directory doesn't know.
    /// The directory and the API disagree, so the run can't be trusted.
    #[error("unknown station id {0}")]
    UnknownStation(StationId),

    /// One direction of a journey record is unusable.
    #[error("malformed journey record: {0}")]
    MalformedRecord(String),
}

impl DomainError {
    /// Whether this error must abort the whole run rather than one direction.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DomainError::UnknownStation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::UnknownStation(StationId(999));
        assert_eq!(err.to_string(), "unknown station id 999");

        let err = DomainError::MalformedRecord("null interchange at position 2".into());
        assert_eq!(
            err.to_string(),
            "malformed journey record: null interchange at position 2"
        );
    }

    #[test]
    fn only_unknown_station_is_fatal() {
        assert!(DomainError::UnknownStation(StationId(1)).is_fatal());
        assert!(!DomainError::MalformedRecord("x".into()).is_fatal());
    }
}
