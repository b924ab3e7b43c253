//! Glyph class tables.

use core::cmp::Ordering;

use font_types::GlyphId16;

use crate::error::MalformedTable;

/// A contiguous range of glyph ids sharing one class value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassRange {
    /// First glyph id in the range.
    pub start: GlyphId16,
    /// Last glyph id in the range, inclusive.
    pub end: GlyphId16,
    /// Class value applied to every glyph in the range.
    pub class: u16,
}

impl ClassRange {
    pub fn new(start: u16, end: u16, class: u16) -> Self {
        Self {
            start: GlyphId16::new(start),
            end: GlyphId16::new(end),
            class,
        }
    }
}

/// Maps glyph ids to class values through sorted, disjoint ranges.
///
/// Built once from parsed font data and read-only afterwards, so a single
/// table can back any number of concurrent scans. Glyphs covered by no range
/// belong to class 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassDef {
    ranges: Vec<ClassRange>,
}

impl ClassDef {
    /// Build a class table, validating the range invariants.
    ///
    /// Ranges must be non-inverted, sorted by start glyph, and pairwise
    /// disjoint; anything else is a [`MalformedTable`].
    pub fn new(ranges: Vec<ClassRange>) -> Result<Self, MalformedTable> {
        for range in &ranges {
            if range.start > range.end {
                return Err(MalformedTable::InvalidRange {
                    start: range.start.to_u16(),
                    end: range.end.to_u16(),
                });
            }
        }
        for pair in ranges.windows(2) {
            if pair[1].start < pair[0].start {
                return Err(MalformedTable::UnsortedRanges);
            }
            if pair[1].start <= pair[0].end {
                return Err(MalformedTable::OverlappingRanges {
                    first: pair[0].start.to_u16(),
                    second: pair[1].start.to_u16(),
                });
            }
        }
        Ok(Self { ranges })
    }

    /// A table with no ranges; every glyph is class 0.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The class value for `glyph`, 0 if no range contains it.
    pub fn get(&self, glyph: GlyphId16) -> u16 {
        self.ranges
            .binary_search_by(|range| {
                if range.end < glyph {
                    Ordering::Less
                } else if range.start > glyph {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            })
            .map(|idx| self.ranges[idx].class)
            .unwrap_or(0)
    }
}
