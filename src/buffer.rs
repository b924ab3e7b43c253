//! Glyph runs.

use font_types::GlyphId16;

/// An ordered sequence of glyph ids being shaped.
///
/// A run is the unit substitutions operate on: lookups replace, delete, or
/// insert glyphs, so the length is mutable. One run is only ever mutated by
/// one scan at a time; the tables driving the scan are shared and read-only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphRun {
    glyphs: Vec<GlyphId16>,
}

impl GlyphRun {
    pub fn new(glyphs: Vec<GlyphId16>) -> Self {
        Self { glyphs }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<GlyphId16> {
        self.glyphs.get(pos).copied()
    }

    pub fn as_slice(&self) -> &[GlyphId16] {
        &self.glyphs
    }

    pub fn into_inner(self) -> Vec<GlyphId16> {
        self.glyphs
    }

    /// Replace the glyph at `pos` in place.
    pub(crate) fn replace(&mut self, pos: usize, glyph: GlyphId16) {
        self.glyphs[pos] = glyph;
    }

    /// Replace the glyphs in `range` with `replacement`, shifting the tail.
    pub(crate) fn splice(&mut self, range: core::ops::Range<usize>, replacement: &[GlyphId16]) {
        self.glyphs.splice(range, replacement.iter().copied());
    }
}

impl FromIterator<GlyphId16> for GlyphRun {
    fn from_iter<T: IntoIterator<Item = GlyphId16>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl FromIterator<u16> for GlyphRun {
    fn from_iter<T: IntoIterator<Item = u16>>(iter: T) -> Self {
        iter.into_iter().map(GlyphId16::new).collect()
    }
}
