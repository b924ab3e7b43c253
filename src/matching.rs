//! Matching of glyph patterns.

use font_types::GlyphId16;
use smallvec::SmallVec;

use crate::buffer::GlyphRun;
use crate::contextual::SubstLookupRecord;
use crate::error::ApplyError;
use crate::lookup::{LookupList, MAX_CONTEXT_LENGTH};

/// Positions of the matched input-sequence glyphs within the run.
///
/// Recorded once when a rule matches; later rebound across run-length
/// changes so every entry keeps pointing at its original input glyph.
pub(crate) type MatchPositions = SmallVec<[usize; 8]>;

/// Value represents a glyph id.
pub(crate) fn match_glyph(glyph: GlyphId16, value: u16) -> bool {
    glyph.to_u16() == value
}

/// Match `backtrack` against the glyphs immediately before `pos`.
///
/// `backtrack[0]` is compared against the glyph just before the match
/// point, `backtrack[1]` against the one before that, and so on. Running
/// out of preceding glyphs is a plain non-match.
pub(crate) fn match_backtrack(
    run: &GlyphRun,
    pos: usize,
    backtrack: &[u16],
    match_fn: impl Fn(GlyphId16, u16) -> bool,
) -> bool {
    if backtrack.len() > pos {
        return false;
    }
    backtrack
        .iter()
        .enumerate()
        .all(|(i, &value)| run.get(pos - 1 - i).is_some_and(|glyph| match_fn(glyph, value)))
}

/// Match the stored input tail against the glyphs after `pos`.
///
/// The glyph at `pos` itself is the implicit match point; the caller has
/// already established that the lookup applies to it, so `input` only
/// covers input-sequence positions 1 and up. On success returns the end of
/// the matched region (one past the last input glyph) and records the
/// position of every input-sequence glyph, match point included.
pub(crate) fn match_input(
    run: &GlyphRun,
    pos: usize,
    input: &[u16],
    match_fn: impl Fn(GlyphId16, u16) -> bool,
    positions: &mut MatchPositions,
) -> Option<usize> {
    let count = input.len() + 1;
    if count > MAX_CONTEXT_LENGTH {
        return None;
    }

    positions.clear();
    positions.push(pos);
    for (i, &value) in input.iter().enumerate() {
        let idx = pos + 1 + i;
        if !run.get(idx).is_some_and(|glyph| match_fn(glyph, value)) {
            return None;
        }
        positions.push(idx);
    }
    Some(pos + count)
}

/// Match `lookahead` against the glyphs starting at `match_end`.
///
/// Running off the end of the run is a plain non-match.
pub(crate) fn match_lookahead(
    run: &GlyphRun,
    match_end: usize,
    lookahead: &[u16],
    match_fn: impl Fn(GlyphId16, u16) -> bool,
) -> bool {
    lookahead
        .iter()
        .enumerate()
        .all(|(i, &value)| run.get(match_end + i).is_some_and(|glyph| match_fn(glyph, value)))
}

/// Run the substitution actions of a matched rule, in listed order.
///
/// Every referenced lookup is resolved up front, before the first action
/// mutates the run; an unresolved index therefore leaves the run untouched.
/// Positions are computed once from the original match. When a nested
/// lookup changes the run length, the entries after the mutation point are
/// shifted by the delta so each sequence index keeps addressing the glyph
/// it addressed in the pre-substitution input sequence.
///
/// Returns the position one past the consumed region, for the caller to
/// continue its scan from.
pub(crate) fn apply_nested_lookups(
    lookups: &LookupList,
    run: &mut GlyphRun,
    positions: &mut MatchPositions,
    match_end: usize,
    records: &[SubstLookupRecord],
    depth: usize,
) -> Result<usize, ApplyError> {
    for record in records {
        if lookups.get(record.lookup_index).is_none() {
            return Err(ApplyError::UnresolvedLookup(record.lookup_index));
        }
    }

    let count = positions.len();
    let mut end = match_end;

    for record in records {
        let idx = usize::from(record.sequence_index);
        if idx >= count {
            continue;
        }
        let at = positions[idx];
        // An earlier action may have deleted this far into the run.
        if at >= run.len() {
            continue;
        }

        let orig_len = run.len();
        if lookups
            .apply_nested(record.lookup_index, run, at, depth + 1)?
            .is_none()
        {
            continue;
        }
        let delta = run.len() as isize - orig_len as isize;
        if delta == 0 {
            continue;
        }
        log::trace!(
            "nested lookup {} changed run length by {delta} at {at}",
            record.lookup_index
        );

        end = end
            .checked_add_signed(delta)
            .unwrap_or(0)
            // A nested lookup cannot rewind past its own position.
            .max(at);
        for position in positions[idx + 1..].iter_mut() {
            if *position > at {
                *position = position.checked_add_signed(delta).unwrap_or(at);
            }
        }
    }

    Ok(end)
}
