//! Fatal planning errors: malformed inputs that violate the schema contract (§7).
//!
//! Everything recoverable (coverage pointing at an unknown test, an open prior
//! test location with no successor, a prior report missing a referenced test
//! file) is handled locally by the relevant component instead of surfacing here.

use thiserror::Error;

use super::model::Mutant;

/// Fatal failure of the planning pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// A mutant was given an empty identifier.
    #[error("mutant at index {index} has an empty id")]
    EmptyMutantId {
        /// Position of the offending mutant in the input slice.
        index: usize,
    },
    /// Two mutants share the same identifier.
    #[error("duplicate mutant id {id:?}")]
    DuplicateMutantId {
        /// The repeated id.
        id: String,
    },
    /// A mutant was given an empty file name.
    #[error("mutant {id:?} has an empty file name")]
    EmptyFileName {
        /// The offending mutant's id.
        id: String,
    },
    /// A mutant's location has a line number of 0 (lines are 1-based).
    #[error("mutant {id:?} has an invalid location: line numbers are 1-based")]
    InvalidLocationLine {
        /// The offending mutant's id.
        id: String,
    },
    /// A mutant's location has its end strictly before its start.
    #[error("mutant {id:?} has an invalid location: end precedes start")]
    InvalidLocationOrder {
        /// The offending mutant's id.
        id: String,
    },
}

/// Validate the schema contract §7 expects the caller to uphold, before any
/// planning component runs.
pub fn validate_mutants(mutants: &[Mutant]) -> Result<(), PlanError> {
    let mut seen_ids = std::collections::BTreeSet::new();

    for (index, mutant) in mutants.iter().enumerate() {
        if mutant.id.is_empty() {
            return Err(PlanError::EmptyMutantId { index });
        }
        if !seen_ids.insert(mutant.id.as_str()) {
            return Err(PlanError::DuplicateMutantId {
                id: mutant.id.clone(),
            });
        }
        if mutant.file_name.is_empty() {
            return Err(PlanError::EmptyFileName {
                id: mutant.id.clone(),
            });
        }
        if mutant.location.start.line == 0 || mutant.location.end.line == 0 {
            return Err(PlanError::InvalidLocationLine {
                id: mutant.id.clone(),
            });
        }
        if mutant.location.end < mutant.location.start {
            return Err(PlanError::InvalidLocationOrder {
                id: mutant.id.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::model::Location;
    use crate::plan::model::Position;

    fn mutant(id: &str, file_name: &str, start: (u32, u32), end: (u32, u32)) -> Mutant {
        Mutant {
            id: id.to_string(),
            file_name: file_name.to_string(),
            mutator_name: "op".to_string(),
            replacement: "-".to_string(),
            location: Location {
                start: Position::new(start.0, start.1),
                end: Position::new(end.0, end.1),
            },
            status: None,
            status_reason: None,
            tests_completed: None,
            killed_by: None,
            covered_by: None,
            is_static: None,
        }
    }

    #[test]
    fn accepts_well_formed_mutants() {
        let mutants = vec![mutant("1", "src/lib.rs", (3, 0), (3, 5))];
        assert!(validate_mutants(&mutants).is_ok());
    }

    #[test]
    fn rejects_empty_id() {
        let mutants = vec![mutant("", "src/lib.rs", (3, 0), (3, 5))];
        assert_eq!(
            validate_mutants(&mutants),
            Err(PlanError::EmptyMutantId { index: 0 })
        );
    }

    #[test]
    fn rejects_duplicate_id() {
        let mutants = vec![
            mutant("1", "src/lib.rs", (3, 0), (3, 5)),
            mutant("1", "src/lib.rs", (4, 0), (4, 5)),
        ];
        assert_eq!(
            validate_mutants(&mutants),
            Err(PlanError::DuplicateMutantId { id: "1".to_string() })
        );
    }

    #[test]
    fn rejects_zero_line() {
        let mutants = vec![mutant("1", "src/lib.rs", (0, 0), (3, 5))];
        assert_eq!(
            validate_mutants(&mutants),
            Err(PlanError::InvalidLocationLine { id: "1".to_string() })
        );
    }

    #[test]
    fn rejects_inverted_range() {
        let mutants = vec![mutant("1", "src/lib.rs", (5, 0), (3, 0))];
        assert_eq!(
            validate_mutants(&mutants),
            Err(PlanError::InvalidLocationOrder { id: "1".to_string() })
        );
    }
}
