//! Error types.

use crate::lookup::LookupIndex;

/// Errors detected while constructing substitution tables.
///
/// Construction failure is fatal to the table being built, but unrelated
/// lookups from the same font are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MalformedTable {
    #[error("class range {start}..={end} is inverted")]
    InvalidRange { start: u16, end: u16 },
    #[error("class ranges are not sorted by start glyph")]
    UnsortedRanges,
    #[error("class ranges starting at {first} and {second} overlap")]
    OverlappingRanges { first: u16, second: u16 },
    #[error("declared {field} count {declared} disagrees with {stored} stored elements")]
    CountMismatch {
        field: &'static str,
        declared: u16,
        stored: usize,
    },
    #[error(
        "substitution action targets sequence index {sequence_index} \
         in an input sequence of length {input_count}"
    )]
    SequenceIndexOutOfRange {
        sequence_index: u16,
        input_count: u16,
    },
}

/// Errors raised while applying a lookup to a run.
///
/// An `UnresolvedLookup` is reported before any action of the offending rule
/// has mutated the run, so the run is left exactly as it was passed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    #[error("substitution action references unknown lookup {0}")]
    UnresolvedLookup(LookupIndex),
    #[error("lookup recursion exceeded the nesting limit")]
    NestingLimitExceeded,
}
