//! Errors reported at the container boundary.
use core::fmt;

/// The error type for [`Leanwood`](crate::Leanwood) operations.
///
/// Both kinds are contract violations by the caller, each tagged with the
/// name of the operation that rejected the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A required argument was absent.
    InvalidArgument(&'static str),

    /// The operation needs at least one entry, but the tree is empty.
    EmptyContainer(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidArgument(op) => write!(fmt, "argument to {op}() is absent"),
            Error::EmptyContainer(op) => write!(fmt, "{op}() called on an empty tree"),
        }
    }
}

impl core::error::Error for Error {}

/// A broken structural invariant, as reported by
/// [`Leanwood::validate`](crate::Leanwood::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The root node is red.
    RedRoot,

    /// A key lies outside the range allowed by its ancestors.
    Order,

    /// A node has a red `big` child.
    RedBigLink,

    /// A red node has a red `small` child.
    ConsecutiveReds,

    /// The two subtrees of a node carry a different number of black links.
    BlackImbalance { small: usize, big: usize },

    /// A node's size counter disagrees with its subtrees.
    SizeMismatch { recorded: usize, actual: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Violation::RedRoot => write!(fmt, "root link is red"),
            Violation::Order => write!(fmt, "keys are not in symmetric order"),
            Violation::RedBigLink => write!(fmt, "red link leans to the big side"),
            Violation::ConsecutiveReds => write!(fmt, "two consecutive red links"),
            Violation::BlackImbalance { small, big } => {
                write!(fmt, "unbalanced blacks, small side: {small}, big side: {big}")
            }
            Violation::SizeMismatch { recorded, actual } => {
                write!(fmt, "subtree size is {recorded}, counted {actual}")
            }
        }
    }
}

impl core::error::Error for Violation {}

#[cfg(test)]
mod tests {
    use super::{Error, Violation};

    #[test]
    pub fn error_messages_name_the_operation() {
        assert_eq!(
            Error::EmptyContainer("delete_min").to_string(),
            "delete_min() called on an empty tree"
        );
        assert_eq!(
            Error::InvalidArgument("put").to_string(),
            "argument to put() is absent"
        );
    }

    #[test]
    pub fn violation_messages() {
        let err = Violation::BlackImbalance { small: 2, big: 1 };
        assert_eq!(err.to_string(), "unbalanced blacks, small side: 2, big side: 1");
    }
}
