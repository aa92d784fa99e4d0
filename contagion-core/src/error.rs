//! Error types for the contagion core library.
//!
//! Defines the load, configuration and query error enums exposed by the
//! public API together with their stable machine-readable codes.

use std::{fmt, io, sync::Arc};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while reading an edge-list dataset.
///
/// Load errors are fatal: no partially built graph is returned.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LoadError {
    /// The underlying reader failed.
    #[error("failed to read dataset: {source}")]
    Io {
        /// Error raised by the reader.
        #[source]
        source: io::Error,
    },
    /// The dataset contained no header record.
    #[error("dataset is missing the `<nodes> <edges>` header")]
    MissingHeader,
    /// The header record could not be parsed.
    #[error("line {line}: header must contain a node count and an edge count")]
    MalformedHeader {
        /// One-based line number of the header.
        line: usize,
    },
    /// The header declared more nodes than can be allocated.
    #[error("line {line}: declared node count {nodes} is too large to allocate")]
    HeaderTooLarge {
        /// One-based line number of the header.
        line: usize,
        /// Node count declared by the header.
        nodes: usize,
    },
    /// An edge record could not be parsed.
    #[error("line {line}: malformed edge record ({reason})")]
    MalformedRecord {
        /// One-based line number of the record.
        line: usize,
        /// Short description of the parse failure.
        reason: &'static str,
    },
    /// An edge record carried a negative or non-finite weight.
    #[error("line {line}: weight {weight} must be a finite non-negative number")]
    InvalidWeight {
        /// One-based line number of the record.
        line: usize,
        /// Offending weight value.
        weight: f64,
    },
    /// An edge record referenced the reserved node id `0`.
    #[error("line {line}: node id 0 is reserved")]
    ReservedNode {
        /// One-based line number of the record.
        line: usize,
    },
    /// An edge record referenced a node beyond the declared node count.
    #[error("line {line}: node {node} exceeds the declared node count {declared}")]
    NodeOutOfRange {
        /// One-based line number of the record.
        line: usize,
        /// Node id found in the record.
        node: usize,
        /// Node count declared by the header.
        declared: usize,
    },
}

impl From<io::Error> for LoadError {
    fn from(source: io::Error) -> Self {
        Self::Io { source }
    }
}

define_error_codes! {
    /// Stable codes describing [`LoadError`] variants.
    enum LoadErrorCode for LoadError {
        /// The underlying reader failed.
        Io => Io { .. } => "LOAD_IO",
        /// The dataset contained no header record.
        MissingHeader => MissingHeader => "LOAD_MISSING_HEADER",
        /// The header record could not be parsed.
        MalformedHeader => MalformedHeader { .. } => "LOAD_MALFORMED_HEADER",
        /// The header declared more nodes than can be allocated.
        HeaderTooLarge => HeaderTooLarge { .. } => "LOAD_HEADER_TOO_LARGE",
        /// An edge record could not be parsed.
        MalformedRecord => MalformedRecord { .. } => "LOAD_MALFORMED_RECORD",
        /// An edge record carried a negative or non-finite weight.
        InvalidWeight => InvalidWeight { .. } => "LOAD_INVALID_WEIGHT",
        /// An edge record referenced the reserved node id `0`.
        ReservedNode => ReservedNode { .. } => "LOAD_RESERVED_NODE",
        /// An edge record referenced a node beyond the declared node count.
        NodeOutOfRange => NodeOutOfRange { .. } => "LOAD_NODE_OUT_OF_RANGE",
    }
}

/// Error type produced when configuring or loading a [`crate::SpreadNetwork`].
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Transmissibility must be a finite, non-negative number.
    #[error("transmissibility must be finite and non-negative (got {got})")]
    InvalidTransmissibility {
        /// The rejected value.
        got: f64,
    },
    /// Reading the dataset failed.
    #[error("dataset `{dataset}` failed to load: {error}")]
    Load {
        /// Identifier of the dataset that failed.
        dataset: Arc<str>,
        /// Underlying load error.
        #[source]
        error: LoadError,
    },
}

define_error_codes! {
    /// Stable codes describing [`NetworkError`] variants.
    enum NetworkErrorCode for NetworkError {
        /// Transmissibility must be a finite, non-negative number.
        InvalidTransmissibility => InvalidTransmissibility { .. } => "NETWORK_INVALID_TRANSMISSIBILITY",
        /// Reading the dataset failed.
        LoadFailure => Load { .. } => "NETWORK_LOAD_FAILURE",
    }
}

impl NetworkError {
    /// Retrieve the inner [`LoadErrorCode`] when the error originated while
    /// reading the dataset.
    #[must_use]
    pub const fn load_code(&self) -> Option<LoadErrorCode> {
        match self {
            Self::Load { error, .. } => Some(error.code()),
            Self::InvalidTransmissibility { .. } => None,
        }
    }
}

/// Failure of a structural query against a loaded network.
///
/// Every variant except [`QueryError::PredecessorCycle`] corresponds to a
/// `-1` result in the integer convention used by reporting front ends.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum QueryError {
    /// Seed id outside `[1, node_slots)`.
    #[error("seed {seed} is outside [1, {node_slots})")]
    SeedOutOfRange {
        /// Rejected seed id.
        seed: usize,
        /// Number of node slots in the graph store, including slot 0.
        node_slots: usize,
    },
    /// Population threshold outside `[0, 1]`.
    #[error("threshold {threshold} is outside [0, 1]")]
    ThresholdOutOfRange {
        /// Rejected threshold.
        threshold: f64,
    },
    /// Node id outside `[1, node_slots)`.
    #[error("node {node} is outside [1, {node_slots})")]
    NodeOutOfRange {
        /// Rejected node id.
        node: usize,
        /// Number of node slots in the graph store, including slot 0.
        node_slots: usize,
    },
    /// The removal selector matched no active node.
    #[error("removal selection matched no nodes")]
    EmptySelection,
    /// The seed's component cannot cover the requested population fraction.
    #[error("spread reached {reached} nodes but {required:.4} of the population was requested")]
    ThresholdUnreachable {
        /// Nodes reached before the traversal ran out of frontier.
        reached: usize,
        /// Requested population fraction.
        required: f64,
    },
    /// Path reconstruction found a predecessor cycle.
    #[error("predecessor walk from {destination} did not terminate")]
    PredecessorCycle {
        /// Destination the walk started from.
        destination: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`QueryError`] variants.
    enum QueryErrorCode for QueryError {
        /// Seed id outside the valid node range.
        SeedOutOfRange => SeedOutOfRange { .. } => "QUERY_SEED_OUT_OF_RANGE",
        /// Population threshold outside `[0, 1]`.
        ThresholdOutOfRange => ThresholdOutOfRange { .. } => "QUERY_THRESHOLD_OUT_OF_RANGE",
        /// Node id outside the valid node range.
        NodeOutOfRange => NodeOutOfRange { .. } => "QUERY_NODE_OUT_OF_RANGE",
        /// The removal selector matched no active node.
        EmptySelection => EmptySelection => "QUERY_EMPTY_SELECTION",
        /// The seed's component cannot cover the requested population fraction.
        ThresholdUnreachable => ThresholdUnreachable { .. } => "QUERY_THRESHOLD_UNREACHABLE",
        /// Path reconstruction found a predecessor cycle.
        PredecessorCycle => PredecessorCycle { .. } => "QUERY_PREDECESSOR_CYCLE",
    }
}

impl QueryError {
    /// Returns `true` when the failure maps onto the legacy `-1` result.
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        !matches!(self, Self::PredecessorCycle { .. })
    }
}

/// Convenient alias for results returned by network construction.
pub type Result<T> = core::result::Result<T, NetworkError>;

/// Convenient alias for results returned by structural queries.
pub type QueryResult<T> = core::result::Result<T, QueryError>;
