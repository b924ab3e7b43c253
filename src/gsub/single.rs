//! Single substitution: one glyph replaced by one glyph.

use std::collections::BTreeMap;

use font_types::GlyphId16;

use crate::buffer::GlyphRun;

/// Replaces single glyphs according to a target-to-replacement map.
///
/// The map doubles as the lookup's coverage: a position whose glyph is not
/// a key is a non-match, never an error.
#[derive(Clone, Debug, Default)]
pub struct SingleSubst {
    map: BTreeMap<GlyphId16, GlyphId16>,
}

impl SingleSubst {
    pub fn new(map: BTreeMap<GlyphId16, GlyphId16>) -> Self {
        Self { map }
    }

    /// Replace the glyph at `pos` in place. Returns the position one past
    /// the substituted glyph, or `None` if the glyph is not covered.
    pub(crate) fn apply(&self, run: &mut GlyphRun, pos: usize) -> Option<usize> {
        let glyph = run.get(pos)?;
        let replacement = *self.map.get(&glyph)?;
        run.replace(pos, replacement);
        Some(pos + 1)
    }
}

impl FromIterator<(u16, u16)> for SingleSubst {
    fn from_iter<T: IntoIterator<Item = (u16, u16)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(target, replacement)| {
                    (GlyphId16::new(target), GlyphId16::new(replacement))
                })
                .collect(),
        )
    }
}
