//! Lookup registry and run scanning.

use crate::buffer::GlyphRun;
use crate::contextual::ChainContextSubst;
use crate::error::ApplyError;
use crate::gsub::{LigatureSubst, MultipleSubst, SingleSubst};

/// Maximum depth of nested lookup invocations.
pub const MAX_NESTING_LEVEL: usize = 64;
/// Maximum length of a matched input sequence; longer rules never match.
pub const MAX_CONTEXT_LENGTH: usize = 64;

/// Index of a lookup in the registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LookupIndex(pub u16);

impl core::fmt::Display for LookupIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

/// One substitution lookup of any supported kind.
#[derive(Clone, Debug)]
pub enum GsubLookup {
    Single(SingleSubst),
    Multiple(MultipleSubst),
    Ligature(LigatureSubst),
    ChainContext(ChainContextSubst),
}

/// The lookup registry: lookups addressable by index.
///
/// Chain-context rules reference other registry entries by [`LookupIndex`],
/// including further chain-context lookups; recursion is bounded by
/// [`MAX_NESTING_LEVEL`]. The registry is read-only during scanning and can
/// be shared across concurrent scans of independent runs.
#[derive(Clone, Debug, Default)]
pub struct LookupList {
    lookups: Vec<GsubLookup>,
}

impl LookupList {
    pub fn new(lookups: Vec<GsubLookup>) -> Self {
        Self { lookups }
    }

    pub fn len(&self) -> usize {
        self.lookups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookups.is_empty()
    }

    pub fn get(&self, index: LookupIndex) -> Option<&GsubLookup> {
        self.lookups.get(usize::from(index.0))
    }

    /// Apply the lookup `index` to `run` at `pos`.
    ///
    /// Returns `Ok(Some(end))` with the cursor advanced one past the
    /// consumed region, `Ok(None)` if the lookup does not match at `pos`,
    /// or an error for an unknown index. The run is never left partially
    /// substituted on error.
    pub fn apply_at(
        &self,
        index: LookupIndex,
        run: &mut GlyphRun,
        pos: usize,
    ) -> Result<Option<usize>, ApplyError> {
        self.apply_nested(index, run, pos, 0)
    }

    pub(crate) fn apply_nested(
        &self,
        index: LookupIndex,
        run: &mut GlyphRun,
        pos: usize,
        depth: usize,
    ) -> Result<Option<usize>, ApplyError> {
        if depth > MAX_NESTING_LEVEL {
            return Err(ApplyError::NestingLimitExceeded);
        }
        let lookup = self
            .get(index)
            .ok_or(ApplyError::UnresolvedLookup(index))?;
        match lookup {
            GsubLookup::Single(subst) => Ok(subst.apply(run, pos)),
            GsubLookup::Multiple(subst) => Ok(subst.apply(run, pos)),
            GsubLookup::Ligature(subst) => Ok(subst.apply(run, pos)),
            GsubLookup::ChainContext(subst) => subst.apply(self, run, pos, depth),
        }
    }

    /// Scan `run` left to right, applying lookup `index` at each position.
    ///
    /// A position with no match advances the cursor by one glyph; a match
    /// advances it past the consumed region, so one scan never re-matches
    /// inside glyphs an earlier rule already consumed. Returns whether any
    /// substitution was applied.
    pub fn apply_to_run(&self, index: LookupIndex, run: &mut GlyphRun) -> Result<bool, ApplyError> {
        let mut pos = 0;
        let mut applied = false;
        while pos < run.len() {
            match self.apply_at(index, run, pos)? {
                Some(end) => {
                    applied = true;
                    // A deleting substitution can report `end == pos`; the
                    // run shrank, so the scan still advances.
                    pos = end;
                }
                None => pos += 1,
            }
        }
        log::debug!("lookup {index} scan finished, applied: {applied}");
        Ok(applied)
    }
}

impl FromIterator<GsubLookup> for LookupList {
    fn from_iter<T: IntoIterator<Item = GsubLookup>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
