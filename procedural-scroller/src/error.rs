use crate::Integer;

/// A value failed a numeric-refinement or shape check.
///
/// Always fatal to the call that produced it; nothing retries on a validation failure.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("expected a finite number, received {value}")]
    NotFinite { value: f64 },
    #[error("expected a non-negative number, received {value}")]
    Negative { value: f64 },
    #[error("expected an integer, received {value}")]
    NotInteger { value: f64 },
    #[error("expected a positive integer, received {value}")]
    NotPositive { value: i64 },
    #[error("index arithmetic overflowed at {index} (step {step})")]
    IndexOverflow { index: i64, step: i64 },
    #[error("indexes at positions {position} and {next} are not consecutive ({left}, {right})")]
    NotConsecutive {
        position: usize,
        next: usize,
        left: i64,
        right: i64,
    },
    #[error("zone offsets do not partition {len} indexes: {reason}")]
    MalformedPartition { len: usize, reason: &'static str },
}

/// Coarse classification of [`Error`] values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Configuration,
    LayoutInvariant,
    MissingElement,
}

/// Errors raised by window computation, configuration and the scroll state machine.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(
        "min_index ({min_index}) and max_index ({max_index}) are too close together to fit the required items"
    )]
    BoundsTooNarrow {
        min_index: Integer,
        max_index: Integer,
    },

    #[error("min_index ({min_index}) must not be greater than max_index ({max_index})")]
    InvertedBounds {
        min_index: Integer,
        max_index: Integer,
    },

    #[error("invalid {name}: {value} ({reason})")]
    InvalidScale {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error(
        "item at index {index} measured {measured}, smaller than its declared minimum size {minimum}"
    )]
    ItemTooSmall {
        index: Integer,
        measured: f64,
        minimum: f64,
    },

    #[error(
        "unbounded container: scroll size equalled client size for {observations} consecutive window updates, so the container cannot scroll"
    )]
    UnboundedContainer { observations: usize },

    #[error("no mounted element for index {index}")]
    MissingElement { index: Integer },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::BoundsTooNarrow { .. } | Self::InvertedBounds { .. } | Self::InvalidScale { .. } => {
                ErrorKind::Configuration
            }
            Self::ItemTooSmall { .. } | Self::UnboundedContainer { .. } => {
                ErrorKind::LayoutInvariant
            }
            Self::MissingElement { .. } => ErrorKind::MissingElement,
        }
    }
}
