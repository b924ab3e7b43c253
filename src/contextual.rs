//! Chaining contextual substitution rules.

use font_types::GlyphId16;

use crate::buffer::GlyphRun;
use crate::classdef::ClassDef;
use crate::error::{ApplyError, MalformedTable};
use crate::lookup::{LookupIndex, LookupList};
use crate::matching::{
    apply_nested_lookups, match_backtrack, match_glyph, match_input, match_lookahead,
    MatchPositions,
};

/// One substitution action of a chain rule: invoke `lookup_index` at
/// input-sequence position `sequence_index` (0 is the match point).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubstLookupRecord {
    pub sequence_index: u16,
    pub lookup_index: LookupIndex,
}

impl SubstLookupRecord {
    pub fn new(sequence_index: u16, lookup_index: LookupIndex) -> Self {
        Self {
            sequence_index,
            lookup_index,
        }
    }
}

/// A chaining contextual substitution rule.
///
/// The stored sequences hold glyph ids or class values depending on the
/// [`MatchKind`] of the owning lookup. `backtrack` is ordered nearest to the
/// match point first; `input` covers input-sequence positions 1 and up (the
/// match point itself is established by the caller's coverage test and never
/// stored); `lookahead` is in run order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainRule {
    backtrack: Vec<u16>,
    input: Vec<u16>,
    lookahead: Vec<u16>,
    substitutions: Vec<SubstLookupRecord>,
}

impl ChainRule {
    /// Build a rule from the raw table fields, declared counts included.
    ///
    /// The parallel count fields of the source data are validated against
    /// the arrays here, once, instead of being trusted at match time:
    /// `input_count` counts the whole input sequence, so `input` must hold
    /// `input_count - 1` elements, and every substitution action must
    /// target a sequence index below `input_count`.
    pub fn new(
        backtrack_count: u16,
        backtrack: Vec<u16>,
        input_count: u16,
        input: Vec<u16>,
        lookahead_count: u16,
        lookahead: Vec<u16>,
        substitutions: Vec<SubstLookupRecord>,
    ) -> Result<Self, MalformedTable> {
        if usize::from(backtrack_count) != backtrack.len() {
            return Err(MalformedTable::CountMismatch {
                field: "backtrack",
                declared: backtrack_count,
                stored: backtrack.len(),
            });
        }
        if usize::from(input_count) != input.len() + 1 {
            return Err(MalformedTable::CountMismatch {
                field: "input",
                declared: input_count,
                stored: input.len(),
            });
        }
        if usize::from(lookahead_count) != lookahead.len() {
            return Err(MalformedTable::CountMismatch {
                field: "lookahead",
                declared: lookahead_count,
                stored: lookahead.len(),
            });
        }
        for record in &substitutions {
            if record.sequence_index >= input_count {
                return Err(MalformedTable::SequenceIndexOutOfRange {
                    sequence_index: record.sequence_index,
                    input_count,
                });
            }
        }
        Ok(Self {
            backtrack,
            input,
            lookahead,
            substitutions,
        })
    }

    pub fn backtrack(&self) -> &[u16] {
        &self.backtrack
    }

    pub fn input(&self) -> &[u16] {
        &self.input
    }

    pub fn lookahead(&self) -> &[u16] {
        &self.lookahead
    }

    pub fn substitutions(&self) -> &[SubstLookupRecord] {
        &self.substitutions
    }

    /// Length of the full input sequence, match point included.
    pub fn input_count(&self) -> usize {
        self.input.len() + 1
    }
}

/// How the integers stored in chain rules are interpreted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchKind {
    /// Rule elements are literal glyph ids.
    Glyphs,
    /// Rule elements are class values, resolved through one table per
    /// context kind. A context with no table in the source font uses
    /// [`ClassDef::empty`], which puts every glyph in class 0.
    Classes {
        backtrack: ClassDef,
        input: ClassDef,
        lookahead: ClassDef,
    },
}

/// A chaining contextual substitution lookup: an ordered rule list plus the
/// interpretation of the rule elements.
///
/// Rules are tried in table order and the first one whose contexts all match
/// is applied; the rest are skipped for that position.
#[derive(Clone, Debug)]
pub struct ChainContextSubst {
    kind: MatchKind,
    rules: Vec<ChainRule>,
}

impl ChainContextSubst {
    pub fn new(kind: MatchKind, rules: Vec<ChainRule>) -> Self {
        Self { kind, rules }
    }

    pub fn rules(&self) -> &[ChainRule] {
        &self.rules
    }

    /// Try the rules at `pos`, apply the first match.
    ///
    /// The glyph at `pos` is the implicit match point: the caller must
    /// already have established through its coverage mechanism that this
    /// lookup is eligible there, and no part of that test is repeated here.
    /// Returns `Ok(Some(end))` with the position one past the consumed
    /// region, or `Ok(None)` if no rule matched.
    pub(crate) fn apply(
        &self,
        lookups: &LookupList,
        run: &mut GlyphRun,
        pos: usize,
        depth: usize,
    ) -> Result<Option<usize>, ApplyError> {
        let mut positions = MatchPositions::new();
        for (rule_idx, rule) in self.rules.iter().enumerate() {
            let matched = match &self.kind {
                MatchKind::Glyphs => match_rule(
                    run,
                    pos,
                    rule,
                    &mut positions,
                    [&match_glyph, &match_glyph, &match_glyph],
                ),
                MatchKind::Classes {
                    backtrack,
                    input,
                    lookahead,
                } => match_rule(
                    run,
                    pos,
                    rule,
                    &mut positions,
                    [
                        &match_class(backtrack),
                        &match_class(input),
                        &match_class(lookahead),
                    ],
                ),
            };
            let Some(match_end) = matched else {
                continue;
            };
            log::trace!("chain rule {rule_idx} matched at {pos}..{match_end}");
            let end = apply_nested_lookups(
                lookups,
                run,
                &mut positions,
                match_end,
                rule.substitutions(),
                depth,
            )?;
            return Ok(Some(end));
        }
        Ok(None)
    }
}

/// Value represents a glyph class.
fn match_class(class_def: &ClassDef) -> impl Fn(GlyphId16, u16) -> bool + '_ {
    move |glyph, value| class_def.get(glyph) == value
}

/// Test one rule at `pos`; `match_fns` holds one match function per context
/// kind, `[backtrack, input, lookahead]`.
///
/// The contexts short-circuit, but a rule matches exactly when all three
/// would. On success `positions` holds the input-sequence glyph positions.
fn match_rule<F: Fn(GlyphId16, u16) -> bool>(
    run: &GlyphRun,
    pos: usize,
    rule: &ChainRule,
    positions: &mut MatchPositions,
    match_fns: [&F; 3],
) -> Option<usize> {
    let [back_fn, input_fn, ahead_fn] = match_fns;
    let match_end = match_input(run, pos, rule.input(), input_fn, positions)?;
    if !match_lookahead(run, match_end, rule.lookahead(), ahead_fn) {
        return None;
    }
    if !match_backtrack(run, pos, rule.backtrack(), back_fn) {
        return None;
    }
    Some(match_end)
}
