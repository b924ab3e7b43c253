//! Ligature substitution: several glyphs collapsed into one.

use font_types::GlyphId16;

use crate::buffer::GlyphRun;

/// One ligature: a first glyph plus a tail of component glyphs, replaced by
/// a single ligature glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ligature {
    pub first: GlyphId16,
    pub components: Vec<GlyphId16>,
    pub glyph: GlyphId16,
}

impl Ligature {
    pub fn new(first: u16, components: Vec<u16>, glyph: u16) -> Self {
        Self {
            first: GlyphId16::new(first),
            components: components.into_iter().map(GlyphId16::new).collect(),
            glyph: GlyphId16::new(glyph),
        }
    }
}

/// Forms ligatures from contiguous glyph sequences.
///
/// Ligatures are tried in list order and the first whose first glyph and
/// component tail both match wins, so a longer ligature must precede its
/// own prefix in the list.
#[derive(Clone, Debug, Default)]
pub struct LigatureSubst {
    ligatures: Vec<Ligature>,
}

impl LigatureSubst {
    pub fn new(ligatures: Vec<Ligature>) -> Self {
        Self { ligatures }
    }

    /// Collapse the matching sequence starting at `pos` into the ligature
    /// glyph. Returns the position one past the ligature, or `None` if no
    /// ligature matches here.
    pub(crate) fn apply(&self, run: &mut GlyphRun, pos: usize) -> Option<usize> {
        let first = run.get(pos)?;
        for ligature in &self.ligatures {
            if ligature.first != first {
                continue;
            }
            let tail_matches = ligature
                .components
                .iter()
                .enumerate()
                .all(|(i, &component)| run.get(pos + 1 + i) == Some(component));
            if tail_matches {
                run.splice(pos..pos + 1 + ligature.components.len(), &[ligature.glyph]);
                return Some(pos + 1);
            }
        }
        None
    }
}
