/*!
Chaining contextual glyph substitution over shaped glyph runs.

This crate implements the matching and application side of OpenType
chaining contextual substitution (GSUB lookup type 6) together with the
glyph-class range table such rules classify glyphs with. It deliberately
does not parse font binaries: an external font-table parser builds the
[`ClassDef`], [`ChainRule`], and lookup tables once, and this crate scans
runs against them. Tables are read-only after construction and can be
shared freely across concurrent scans of independent runs.

A chain rule matches at a cursor position when its backtrack context (the
glyphs before the match point), its input sequence, and its lookahead
context (the glyphs after the input) all match, either by literal glyph id
or through per-context class tables. Rules are tried in table order and
the first match wins. A matched rule then runs its substitution actions in
order, each invoking another lookup from the registry at a position of the
matched input sequence.

```
use chainsub::{
    ChainContextSubst, ChainRule, GlyphRun, GsubLookup, LookupIndex, LookupList, MatchKind,
    SingleSubst, SubstLookupRecord,
};

// Replace glyph 99 with 100, but only between a 5 and a 20.
let single: SingleSubst = [(99, 100)].into_iter().collect();
let rule = ChainRule::new(
    1,
    vec![5],
    1,
    vec![],
    1,
    vec![20],
    vec![SubstLookupRecord::new(0, LookupIndex(0))],
)?;
let chain = ChainContextSubst::new(MatchKind::Glyphs, vec![rule]);
let lookups: LookupList = [GsubLookup::Single(single), GsubLookup::ChainContext(chain)]
    .into_iter()
    .collect();

let mut run: GlyphRun = [5u16, 99, 20, 99].into_iter().collect();
lookups.apply_to_run(LookupIndex(1), &mut run)?;

let expected: GlyphRun = [5u16, 100, 20, 99].into_iter().collect();
assert_eq!(run, expected);
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

mod buffer;
mod classdef;
mod contextual;
mod error;
mod gsub;
mod lookup;
mod matching;

pub use buffer::GlyphRun;
pub use classdef::{ClassDef, ClassRange};
pub use contextual::{ChainContextSubst, ChainRule, MatchKind, SubstLookupRecord};
pub use error::{ApplyError, MalformedTable};
pub use gsub::{Ligature, LigatureSubst, MultipleSubst, SingleSubst};
pub use lookup::{GsubLookup, LookupIndex, LookupList, MAX_CONTEXT_LENGTH, MAX_NESTING_LEVEL};

pub use font_types::GlyphId16;
