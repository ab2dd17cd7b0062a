//! Error taxonomy for the invasion pipeline.
//!
//! Parsing, linking, and I/O failures are all fatal to the run: this is a
//! batch, single-pass system and any structural error invalidates the whole
//! invasion. Errors are created once at the point of failure and propagated
//! to the caller unmodified.

use crate::city::Direction;

/// Errors surfaced by the map parser, the city graph, and the invasion
/// engine. The binary converts these to a non-zero exit; the library never
/// terminates the process.
#[derive(Debug, thiserror::Error)]
pub enum InvasionError {
    /// A malformed map line. No partial graph is returned.
    #[error("parse error on line {line}: {reason} in '{text}'")]
    Parse {
        line: usize,
        text: String,
        reason: String,
    },

    /// A strict-mode link assignment contradicts an existing road.
    #[error(
        "conflicting road from '{city}' to the {direction}: \
         already links '{existing}', cannot link '{requested}'"
    )]
    Conflict {
        city: String,
        direction: Direction,
        existing: String,
        requested: String,
    },

    /// A link referenced a city that is not in the map. Build pass 1
    /// creates every referenced city, so this is a defensive check only.
    #[error("city '{city}' neighbor '{neighbor}' to the {direction} was not found")]
    UnresolvedNeighbor {
        city: String,
        direction: Direction,
        neighbor: String,
    },

    /// A direction index outside 0..4. Unreachable through the public API;
    /// hitting this indicates a programming error.
    #[error("invalid direction index {0}")]
    InvalidDirection(usize),

    /// Propagated unchanged from the underlying input or output stream.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
