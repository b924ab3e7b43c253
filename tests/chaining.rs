//! End-to-end tests for chaining contextual substitution.

use chainsub::{
    ApplyError, ChainContextSubst, ChainRule, ClassDef, ClassRange, GlyphRun, GsubLookup,
    LookupIndex, LookupList, MatchKind, MultipleSubst, SingleSubst, SubstLookupRecord,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn run(glyphs: &[u16]) -> GlyphRun {
    glyphs.iter().copied().collect()
}

/// A glyph-format rule with no substitution actions, for match testing.
fn context_rule(backtrack: Vec<u16>, input: Vec<u16>, lookahead: Vec<u16>) -> ChainRule {
    ChainRule::new(
        backtrack.len() as u16,
        backtrack,
        input.len() as u16 + 1,
        input,
        lookahead.len() as u16,
        lookahead,
        vec![],
    )
    .unwrap()
}

fn rule_with_actions(
    backtrack: Vec<u16>,
    input: Vec<u16>,
    lookahead: Vec<u16>,
    actions: Vec<(u16, u16)>,
) -> ChainRule {
    ChainRule::new(
        backtrack.len() as u16,
        backtrack,
        input.len() as u16 + 1,
        input,
        lookahead.len() as u16,
        lookahead,
        actions
            .into_iter()
            .map(|(seq, lookup)| SubstLookupRecord::new(seq, LookupIndex(lookup)))
            .collect(),
    )
    .unwrap()
}

fn chain(rules: Vec<ChainRule>) -> GsubLookup {
    GsubLookup::ChainContext(ChainContextSubst::new(MatchKind::Glyphs, rules))
}

#[test]
fn backtrack_and_input_must_both_match() {
    init_logging();
    let lookups: LookupList = [chain(vec![context_rule(vec![5], vec![99], vec![])])]
        .into_iter()
        .collect();

    // run[0] = 5 satisfies the backtrack, run[2] = 99 the input tail.
    let mut glyphs = run(&[5, 10, 99, 20]);
    assert_eq!(lookups.apply_at(LookupIndex(0), &mut glyphs, 1), Ok(Some(3)));

    let mut glyphs = run(&[6, 10, 99, 20]);
    assert_eq!(lookups.apply_at(LookupIndex(0), &mut glyphs, 1), Ok(None));
}

#[test]
fn insufficient_history_is_a_non_match_not_an_error() {
    let lookups: LookupList = [chain(vec![context_rule(vec![5, 5, 5], vec![], vec![])])]
        .into_iter()
        .collect();
    let mut glyphs = run(&[5, 5, 99]);
    assert_eq!(lookups.apply_at(LookupIndex(0), &mut glyphs, 2), Ok(None));
}

#[test]
fn rule_without_context_reduces_to_input_equality() {
    let lookups: LookupList = [chain(vec![context_rule(vec![], vec![31, 32], vec![])])]
        .into_iter()
        .collect();

    let mut glyphs = run(&[30, 31, 32]);
    assert_eq!(lookups.apply_at(LookupIndex(0), &mut glyphs, 0), Ok(Some(3)));
    // The same input tail anywhere in the run, no context required.
    let mut glyphs = run(&[7, 7, 30, 31, 32, 7]);
    assert_eq!(lookups.apply_at(LookupIndex(0), &mut glyphs, 2), Ok(Some(5)));

    let mut glyphs = run(&[30, 31, 99]);
    assert_eq!(lookups.apply_at(LookupIndex(0), &mut glyphs, 0), Ok(None));
}

#[test]
fn first_rule_in_table_order_wins() {
    init_logging();
    let single_a: SingleSubst = [(40, 111)].into_iter().collect();
    let single_b: SingleSubst = [(40, 222)].into_iter().collect();
    // Both rules match at the same position and disagree on the action.
    let rule_a = rule_with_actions(vec![], vec![41], vec![], vec![(0, 0)]);
    let rule_b = rule_with_actions(vec![], vec![41], vec![], vec![(0, 1)]);

    let lookups: LookupList = [
        GsubLookup::Single(single_a.clone()),
        GsubLookup::Single(single_b.clone()),
        chain(vec![rule_a.clone(), rule_b.clone()]),
    ]
    .into_iter()
    .collect();
    let mut glyphs = run(&[40, 41]);
    assert_eq!(lookups.apply_at(LookupIndex(2), &mut glyphs, 0), Ok(Some(2)));
    assert_eq!(glyphs, run(&[111, 41]));

    // Reordering the rules changes the observable result.
    let lookups: LookupList = [
        GsubLookup::Single(single_a),
        GsubLookup::Single(single_b),
        chain(vec![rule_b, rule_a]),
    ]
    .into_iter()
    .collect();
    let mut glyphs = run(&[40, 41]);
    assert_eq!(lookups.apply_at(LookupIndex(2), &mut glyphs, 0), Ok(Some(2)));
    assert_eq!(glyphs, run(&[222, 41]));
}

#[test]
fn actions_use_pre_substitution_indexing_after_growth() {
    init_logging();
    let expand: MultipleSubst = [(10, vec![70, 71, 72])].into_iter().collect();
    let replace_last: SingleSubst = [(12, 99)].into_iter().collect();
    // Sequence index 0 is the match point, index 2 the last input glyph.
    let rule = rule_with_actions(vec![], vec![11, 12], vec![], vec![(0, 0), (2, 1)]);

    let lookups: LookupList = [
        GsubLookup::Multiple(expand),
        GsubLookup::Single(replace_last),
        chain(vec![rule]),
    ]
    .into_iter()
    .collect();

    let mut glyphs = run(&[10, 11, 12]);
    assert_eq!(lookups.apply_at(LookupIndex(2), &mut glyphs, 0), Ok(Some(5)));
    // The second action still hits the original third input glyph even
    // though the first action grew the run by two.
    assert_eq!(glyphs, run(&[70, 71, 72, 11, 99]));
}

#[test]
fn actions_use_pre_substitution_indexing_after_deletion() {
    let delete: MultipleSubst = [(10, vec![])].into_iter().collect();
    let replace_last: SingleSubst = [(12, 99)].into_iter().collect();
    let rule = rule_with_actions(vec![], vec![11, 12], vec![], vec![(0, 0), (2, 1)]);

    let lookups: LookupList = [
        GsubLookup::Multiple(delete),
        GsubLookup::Single(replace_last),
        chain(vec![rule]),
    ]
    .into_iter()
    .collect();

    let mut glyphs = run(&[10, 11, 12]);
    assert_eq!(lookups.apply_at(LookupIndex(2), &mut glyphs, 0), Ok(Some(2)));
    assert_eq!(glyphs, run(&[11, 99]));
}

#[test]
fn substitution_targeting_the_match_point_hits_the_cursor_glyph() {
    let single: SingleSubst = [(40, 90)].into_iter().collect();
    let rule = rule_with_actions(vec![], vec![41, 42], vec![], vec![(0, 0)]);
    let lookups: LookupList = [GsubLookup::Single(single), chain(vec![rule])]
        .into_iter()
        .collect();

    let mut glyphs = run(&[7, 40, 41, 42]);
    assert_eq!(lookups.apply_at(LookupIndex(1), &mut glyphs, 1), Ok(Some(4)));
    assert_eq!(glyphs, run(&[7, 90, 41, 42]));
}

#[test]
fn unresolved_lookup_fails_without_mutating_the_run() {
    init_logging();
    let single: SingleSubst = [(40, 90)].into_iter().collect();
    // The first action resolves; the second references a missing lookup.
    let rule = rule_with_actions(vec![], vec![41], vec![], vec![(0, 0), (1, 9)]);
    let lookups: LookupList = [GsubLookup::Single(single), chain(vec![rule])]
        .into_iter()
        .collect();

    let mut glyphs = run(&[40, 41]);
    assert_eq!(
        lookups.apply_at(LookupIndex(1), &mut glyphs, 0),
        Err(ApplyError::UnresolvedLookup(LookupIndex(9)))
    );
    assert_eq!(glyphs, run(&[40, 41]));
}

#[test]
fn applying_a_missing_lookup_directly_is_an_error() {
    let lookups = LookupList::default();
    let mut glyphs = run(&[1]);
    assert_eq!(
        lookups.apply_at(LookupIndex(0), &mut glyphs, 0),
        Err(ApplyError::UnresolvedLookup(LookupIndex(0)))
    );
}

#[test]
fn class_based_contexts_resolve_through_their_own_tables() {
    init_logging();
    let backtrack_classes =
        ClassDef::new(vec![ClassRange::new(5, 5, 1)]).unwrap();
    let input_classes = ClassDef::new(vec![
        ClassRange::new(10, 12, 1),
        ClassRange::new(20, 20, 2),
    ])
    .unwrap();
    let lookahead_classes = ClassDef::new(vec![ClassRange::new(20, 20, 2)]).unwrap();

    let single: SingleSubst = [(12, 99)].into_iter().collect();
    let rule = ChainRule::new(
        1,
        vec![1],
        2,
        vec![1],
        1,
        vec![2],
        vec![SubstLookupRecord::new(1, LookupIndex(0))],
    )
    .unwrap();
    let chain = ChainContextSubst::new(
        MatchKind::Classes {
            backtrack: backtrack_classes,
            input: input_classes,
            lookahead: lookahead_classes,
        },
        vec![rule],
    );
    let lookups: LookupList = [GsubLookup::Single(single), GsubLookup::ChainContext(chain)]
        .into_iter()
        .collect();

    // 5 is backtrack class 1, 12 is input class 1, 20 is lookahead class 2.
    let mut glyphs = run(&[5, 30, 12, 20]);
    assert_eq!(lookups.apply_at(LookupIndex(1), &mut glyphs, 1), Ok(Some(3)));
    assert_eq!(glyphs, run(&[5, 30, 99, 20]));

    // 6 is class 0 in the backtrack table, so nothing matches.
    let mut glyphs = run(&[6, 30, 12, 20]);
    assert_eq!(lookups.apply_at(LookupIndex(1), &mut glyphs, 1), Ok(None));
    assert_eq!(glyphs, run(&[6, 30, 12, 20]));
}

#[test]
fn uncovered_glyphs_share_class_zero() {
    // A rule naming class 0 matches any glyph outside every range.
    let input_classes = ClassDef::new(vec![ClassRange::new(10, 12, 1)]).unwrap();
    let rule = context_rule(vec![], vec![0], vec![]);
    let chain = ChainContextSubst::new(
        MatchKind::Classes {
            backtrack: ClassDef::empty(),
            input: input_classes,
            lookahead: ClassDef::empty(),
        },
        vec![rule],
    );
    let lookups: LookupList = [GsubLookup::ChainContext(chain)].into_iter().collect();

    let mut glyphs = run(&[1, 50]);
    assert_eq!(lookups.apply_at(LookupIndex(0), &mut glyphs, 0), Ok(Some(2)));
    let mut glyphs = run(&[1, 11]);
    assert_eq!(lookups.apply_at(LookupIndex(0), &mut glyphs, 0), Ok(None));
}

#[test]
fn scan_never_rematches_inside_a_consumed_region() {
    init_logging();
    let single: SingleSubst = [(2, 9)].into_iter().collect();
    // Matches any glyph followed by a 2; the action rewrites the match
    // point, which the single-substitution map only covers when it is a 2.
    let rule = rule_with_actions(vec![], vec![2], vec![], vec![(0, 0)]);
    let lookups: LookupList = [GsubLookup::Single(single), chain(vec![rule])]
        .into_iter()
        .collect();

    let mut glyphs = run(&[1, 2, 2, 2]);
    assert!(lookups.apply_to_run(LookupIndex(1), &mut glyphs).unwrap());
    // The match at position 0 consumes positions 0..2, so the scan resumes
    // at position 2 and the 2 at position 1 is never a match point.
    assert_eq!(glyphs, run(&[1, 2, 9, 2]));
}

#[test]
fn scan_advances_by_one_where_nothing_matches() {
    let lookups: LookupList = [chain(vec![context_rule(vec![], vec![77], vec![])])]
        .into_iter()
        .collect();
    let mut glyphs = run(&[1, 2, 3]);
    assert!(!lookups.apply_to_run(LookupIndex(0), &mut glyphs).unwrap());
    assert_eq!(glyphs, run(&[1, 2, 3]));
}

#[test]
fn chain_lookups_nest_through_the_registry() {
    init_logging();
    let single: SingleSubst = [(50, 60)].into_iter().collect();
    let inner = rule_with_actions(vec![], vec![], vec![], vec![(0, 0)]);
    let outer = rule_with_actions(vec![1], vec![], vec![], vec![(0, 1)]);
    let lookups: LookupList = [
        GsubLookup::Single(single),
        chain(vec![inner]),
        chain(vec![outer]),
    ]
    .into_iter()
    .collect();

    let mut glyphs = run(&[1, 50]);
    assert!(lookups.apply_to_run(LookupIndex(2), &mut glyphs).unwrap());
    assert_eq!(glyphs, run(&[1, 60]));
}

#[test]
fn runaway_recursion_hits_the_nesting_limit() {
    // A chain-context lookup whose only action re-invokes itself.
    let rule = rule_with_actions(vec![], vec![], vec![], vec![(0, 0)]);
    let lookups: LookupList = [chain(vec![rule])].into_iter().collect();

    let mut glyphs = run(&[1]);
    assert_eq!(
        lookups.apply_at(LookupIndex(0), &mut glyphs, 0),
        Err(ApplyError::NestingLimitExceeded)
    );
    assert_eq!(glyphs, run(&[1]));
}

#[test]
fn ligature_action_shrinks_the_run_and_cursor_skips_it() {
    use chainsub::{Ligature, LigatureSubst};

    let liga = LigatureSubst::new(vec![Ligature::new(70, vec![71], 200)]);
    // Ligate 70 71 only after a 5.
    let rule = rule_with_actions(vec![5], vec![71], vec![], vec![(0, 0)]);
    let lookups: LookupList = [GsubLookup::Ligature(liga), chain(vec![rule])]
        .into_iter()
        .collect();

    let mut glyphs = run(&[5, 70, 71, 70, 71]);
    assert!(lookups.apply_to_run(LookupIndex(1), &mut glyphs).unwrap());
    // Only the pair preceded by 5 ligates.
    assert_eq!(glyphs, run(&[5, 200, 70, 71]));
}
