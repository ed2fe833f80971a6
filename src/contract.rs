//! Contract violations.
//!
//! Navigation mistakes such as advancing past the end of a chain or
//! subscripting its end index are caller bugs, not runtime conditions. They
//! are never converted into recoverable results: every operation that detects
//! one calls [`violation`], which panics with the message of the matching
//! [`ContractViolation`].
//!
//! Lookups that may legitimately miss (for example [`Sum::get`] on an
//! unoccupied branch) return `Option` instead and never panic.
//!
//! [`Sum::get`]: crate::algebra::Sum::get

use std::fmt;

/// A misuse of an index or position that indicates a caller bug.
///
/// # Examples
///
/// ```rust
/// use catena::contract::ContractViolation;
///
/// assert_eq!(
///     ContractViolation::AdvancedPastEnd.to_string(),
///     "cannot advance an index past the end of the collection"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractViolation {
    /// A successor was requested for the end index.
    AdvancedPastEnd,
    /// A predecessor was requested for the first index, or for the end index
    /// of an empty collection.
    RetreatedBeforeStart,
    /// The element at the end index was requested.
    SubscriptedEnd,
    /// A linear offset fell outside `0..=count`.
    OffsetOutOfBounds {
        /// The offset that was requested.
        target: isize,
        /// The number of elements in the collection.
        count: usize,
    },
    /// A branch-local index fell outside the branch.
    BranchIndexOutOfBounds {
        /// The branch-local offset that was requested.
        index: usize,
        /// The number of elements in the branch.
        count: usize,
    },
    /// An index was not reached by walking a branch of `count` elements
    /// from its start.
    UnreachableIndex {
        /// The number of elements in the branch.
        count: usize,
    },
    /// A key index named no element of a keyed branch.
    MissingKey,
    /// A branch rank exceeded the arity of the composition.
    RankOutOfRange,
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdvancedPastEnd => {
                write!(formatter, "cannot advance an index past the end of the collection")
            }
            Self::RetreatedBeforeStart => {
                write!(formatter, "cannot move an index before the start of the collection")
            }
            Self::SubscriptedEnd => {
                write!(formatter, "cannot access the element at the end index")
            }
            Self::OffsetOutOfBounds { target, count } => {
                write!(formatter, "offset {target} is outside the valid range 0..={count}")
            }
            Self::BranchIndexOutOfBounds { index, count } => write!(
                formatter,
                "branch index {index} is out of bounds for a branch of {count} elements"
            ),
            Self::UnreachableIndex { count } => write!(
                formatter,
                "index is not reachable within a branch of {count} elements"
            ),
            Self::MissingKey => {
                write!(formatter, "key index does not name an element of the branch")
            }
            Self::RankOutOfRange => {
                write!(formatter, "branch rank exceeds the arity of the composition")
            }
        }
    }
}

/// Aborts the current operation because of a contract violation.
///
/// # Panics
///
/// Always panics with the message of `kind`.
#[cold]
#[inline(never)]
#[track_caller]
pub fn violation(kind: ContractViolation) -> ! {
    panic!("{kind}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        ContractViolation::OffsetOutOfBounds { target: -1, count: 4 },
        "offset -1 is outside the valid range 0..=4"
    )]
    #[case(
        ContractViolation::BranchIndexOutOfBounds { index: 7, count: 3 },
        "branch index 7 is out of bounds for a branch of 3 elements"
    )]
    #[case(
        ContractViolation::UnreachableIndex { count: 2 },
        "index is not reachable within a branch of 2 elements"
    )]
    #[case(
        ContractViolation::SubscriptedEnd,
        "cannot access the element at the end index"
    )]
    fn test_display_messages(#[case] kind: ContractViolation, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
    }

    #[rstest]
    #[should_panic(expected = "cannot move an index before the start of the collection")]
    fn test_violation_panics_with_message() {
        violation(ContractViolation::RetreatedBeforeStart);
    }
}
