//! Multiple substitution: one glyph replaced by a sequence.

use std::collections::BTreeMap;

use font_types::GlyphId16;

use crate::buffer::GlyphRun;

/// Replaces single glyphs with replacement sequences.
///
/// An empty replacement sequence deletes the glyph.
#[derive(Clone, Debug, Default)]
pub struct MultipleSubst {
    map: BTreeMap<GlyphId16, Vec<GlyphId16>>,
}

impl MultipleSubst {
    pub fn new(map: BTreeMap<GlyphId16, Vec<GlyphId16>>) -> Self {
        Self { map }
    }

    /// Splice the replacement sequence over the glyph at `pos`. Returns the
    /// position one past the inserted sequence, or `None` if the glyph is
    /// not covered.
    pub(crate) fn apply(&self, run: &mut GlyphRun, pos: usize) -> Option<usize> {
        let glyph = run.get(pos)?;
        let replacement = self.map.get(&glyph)?;
        run.splice(pos..pos + 1, replacement);
        Some(pos + replacement.len())
    }
}

impl FromIterator<(u16, Vec<u16>)> for MultipleSubst {
    fn from_iter<T: IntoIterator<Item = (u16, Vec<u16>)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(target, replacement)| {
                    (
                        GlyphId16::new(target),
                        replacement.into_iter().map(GlyphId16::new).collect(),
                    )
                })
                .collect(),
        )
    }
}
