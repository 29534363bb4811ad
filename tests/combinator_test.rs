use ftmatch::analysis::tokenizer::StandardTokenizer;
use ftmatch::index::store::TokenStore;
use ftmatch::query::ast::{ContentKind, Range, ScopeKind};
use ftmatch::search::executor::FtContext;
use ftmatch::search::matches::Match;
use ftmatch::{CasePolicy, ErrorKind, EvalContext, Selection, Unit};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn store(text: &str) -> TokenStore {
    TokenStore::build(text, &StandardTokenizer::default(), CasePolicy::Fold).unwrap()
}

fn run<'a>(selection: &Selection, store: &'a TokenStore, tokenizer: &'a StandardTokenizer) -> Vec<Match<'a>> {
    let mut ft = FtContext::new(store, tokenizer, CasePolicy::Fold);
    selection
        .execute(&mut ft)
        .unwrap()
        .collect_all(&EvalContext::default())
        .unwrap()
}

fn include_positions(matches: &[Match]) -> Vec<Vec<u32>> {
    matches.iter().map(Match::include_positions).collect()
}

#[test]
fn test_word_matches_in_document_order() {
    init();
    let tokenizer = StandardTokenizer::default();
    let store = store("red cat blue cat");
    let matches = run(&Selection::word("CAT"), &store, &tokenizer);

    assert_eq!(include_positions(&matches), vec![vec![1], vec![3]]);
    assert!(matches.iter().all(|m| m.excludes.is_empty()));
}

#[test]
fn test_disjunction_concatenates_operands() {
    init();
    let tokenizer = StandardTokenizer::default();
    let store = store("one two three four five dog");
    let selection = Selection::or(vec![Selection::word("cat"), Selection::word("dog")]);

    assert_eq!(include_positions(&run(&selection, &store, &tokenizer)), vec![vec![5]]);
}

#[test]
fn test_conjunction_is_a_cartesian_product() {
    init();
    let tokenizer = StandardTokenizer::default();
    let store = store("a b a b");
    let selection = Selection::and(vec![Selection::word("a"), Selection::word("b")]);

    assert_eq!(
        include_positions(&run(&selection, &store, &tokenizer)),
        vec![vec![0, 1], vec![0, 3], vec![2, 1], vec![2, 3]]
    );

    let missing = Selection::and(vec![Selection::word("a"), Selection::word("zebra")]);
    assert!(run(&missing, &store, &tokenizer).is_empty());
}

#[test]
fn test_query_positions_follow_leaf_order() {
    init();
    let tokenizer = StandardTokenizer::default();
    let store = store("a b");
    let selection = Selection::and(vec![Selection::word("b"), Selection::word("a")]);
    let matches = run(&selection, &store, &tokenizer);

    let query_positions: Vec<u32> = matches[0].includes.iter().map(|m| m.query_pos).collect();
    assert_eq!(query_positions, vec![0, 1]);
    assert_eq!(matches[0].include_positions(), vec![1, 0]);
}

#[test]
fn test_mild_not_removes_overlapping_matches() {
    init();
    let tokenizer = StandardTokenizer::default();
    let store = store("red cat blue cat");
    let selection = Selection::mild_not(Selection::word("cat"), Selection::phrase("blue cat"));

    assert_eq!(include_positions(&run(&selection, &store, &tokenizer)), vec![vec![1]]);
}

#[test]
fn test_mild_not_rejects_operands_with_exclusions() {
    init();
    let tokenizer = StandardTokenizer::default();
    let store = store("cat and dog");
    let ctx = EvalContext::default();

    let right = Selection::mild_not(Selection::word("cat"), Selection::not(Selection::word("dog")));
    let left = Selection::mild_not(Selection::not(Selection::word("dog")), Selection::word("cat"));

    for selection in [right, left] {
        let mut ft = FtContext::new(&store, &tokenizer, CasePolicy::Fold);
        let mut cursor = selection.execute(&mut ft).unwrap();
        let err = cursor.next(&ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMildNotOperand);
    }
}

#[test]
fn test_not_swaps_includes_and_excludes() {
    init();
    let tokenizer = StandardTokenizer::default();
    let store = store("dog cat dog");
    let matches = run(&Selection::not(Selection::word("dog")), &store, &tokenizer);

    assert_eq!(matches.len(), 1);
    assert!(matches[0].includes.is_empty());
    assert_eq!(matches[0].exclude_positions(), vec![0, 2]);
}

#[test]
fn test_order_follows_query_order() {
    init();
    let tokenizer = StandardTokenizer::default();
    let selection = Selection::order(Selection::and(vec![
        Selection::word("fox"),
        Selection::word("jumps"),
    ]));

    let ordered = store("the fox jumps");
    assert_eq!(include_positions(&run(&selection, &ordered, &tokenizer)), vec![vec![1, 2]]);

    let reversed = store("jumps ahead, fox ran");
    assert!(run(&selection, &reversed, &tokenizer).is_empty());
}

#[test]
fn test_same_and_different_sentence() {
    init();
    let tokenizer = StandardTokenizer::default();
    let store = store("The cat sat. The dog ran.");
    let cat_dog = Selection::and(vec![Selection::word("cat"), Selection::word("dog")]);
    let cat_sat = Selection::and(vec![Selection::word("cat"), Selection::word("sat")]);

    let same = |arg: &Selection| Selection::scope(arg.clone(), ScopeKind::Same, Unit::Sentence);
    let different = |arg: &Selection| Selection::scope(arg.clone(), ScopeKind::Different, Unit::Sentence);

    assert!(run(&same(&cat_dog), &store, &tokenizer).is_empty());
    assert_eq!(include_positions(&run(&same(&cat_sat), &store, &tokenizer)), vec![vec![1, 2]]);
    assert_eq!(include_positions(&run(&different(&cat_dog), &store, &tokenizer)), vec![vec![1, 4]]);
    assert!(run(&different(&cat_sat), &store, &tokenizer).is_empty());
}

#[test]
fn test_scope_filters_excludes_to_the_matched_unit() {
    init();
    let tokenizer = StandardTokenizer::default();
    let store = store("Cat dog. Cat bird. Dog");
    let selection = Selection::scope(
        Selection::and(vec![Selection::word("cat"), Selection::not(Selection::word("dog"))]),
        ScopeKind::Same,
        Unit::Sentence,
    );
    let matches = run(&selection, &store, &tokenizer);

    assert_eq!(include_positions(&matches), vec![vec![0], vec![2]]);
    assert_eq!(matches[0].exclude_positions(), vec![1]);
    assert!(matches[1].excludes.is_empty());
}

#[test]
fn test_content_marks_first_and_last_include() {
    init();
    let tokenizer = StandardTokenizer::default();
    let store = store("zero one two three alpha five six beta eight gamma");
    let all = Selection::and(vec![
        Selection::word("beta"),
        Selection::word("alpha"),
        Selection::word("gamma"),
    ]);

    let at_start = run(&Selection::content(all.clone(), ContentKind::AtStart), &store, &tokenizer);
    let flagged: Vec<u32> = at_start[0]
        .includes
        .iter()
        .filter(|m| m.start_token)
        .map(|m| m.position())
        .collect();
    assert_eq!(flagged, vec![4]);

    let at_end = run(&Selection::content(all, ContentKind::AtEnd), &store, &tokenizer);
    let flagged: Vec<u32> = at_end[0]
        .includes
        .iter()
        .filter(|m| m.end_token)
        .map(|m| m.position())
        .collect();
    assert_eq!(flagged, vec![9]);
}

#[test]
fn test_distance_between_consecutive_includes() {
    init();
    let tokenizer = StandardTokenizer::default();
    let store = store("alpha beta gamma delta");
    let pair = Selection::and(vec![Selection::word("delta"), Selection::word("alpha")]);

    let at_least_two = Selection::distance(pair.clone(), Range::AtLeast(2), Unit::Word);
    assert_eq!(include_positions(&run(&at_least_two, &store, &tokenizer)), vec![vec![3, 0]]);

    let exactly_one = Selection::distance(pair, Range::Exactly(1), Unit::Word);
    assert!(run(&exactly_one, &store, &tokenizer).is_empty());

    let sentences = store_with_sentences();
    let adjacent_sentences = Selection::distance(
        Selection::and(vec![Selection::word("first"), Selection::word("third")]),
        Range::AtMost(0),
        Unit::Sentence,
    );
    assert!(run(&adjacent_sentences, &sentences, &tokenizer).is_empty());
}

fn store_with_sentences() -> TokenStore {
    store("The first one. The second one. The third one.")
}

#[test]
fn test_window_width() {
    init();
    let tokenizer = StandardTokenizer::default();
    let store = store("alpha beta gamma delta");
    let pair = Selection::and(vec![Selection::word("alpha"), Selection::word("gamma")]);

    let wide = Selection::window(pair.clone(), 3, Unit::Word);
    assert_eq!(include_positions(&run(&wide, &store, &tokenizer)), vec![vec![0, 2]]);

    let narrow = Selection::window(pair, 2, Unit::Word);
    assert!(run(&narrow, &store, &tokenizer).is_empty());
}

#[test]
fn test_window_repeats_match_per_start_with_excludes() {
    init();
    let tokenizer = StandardTokenizer::default();
    let store = store("x beta alpha y z");
    let selection = Selection::window(
        Selection::and(vec![Selection::word("alpha"), Selection::not(Selection::word("beta"))]),
        2,
        Unit::Word,
    );
    let matches = run(&selection, &store, &tokenizer);

    // Windows [1, 2] and [2, 3] both cover alpha at 2; only the first holds beta
    assert_eq!(include_positions(&matches), vec![vec![2], vec![2]]);
    assert_eq!(matches[0].exclude_positions(), vec![1]);
    assert!(matches[1].excludes.is_empty());
}

#[test]
fn test_cursor_observes_cancellation() {
    init();
    let tokenizer = StandardTokenizer::default();
    let store = store("a a a a a a a a");
    let ctx = EvalContext::default();
    let selection = Selection::and(vec![Selection::word("a"), Selection::word("a")]);

    let mut ft = FtContext::new(&store, &tokenizer, CasePolicy::Fold);
    let mut cursor = selection.execute(&mut ft).unwrap();
    assert!(cursor.next(&ctx).unwrap());

    ctx.interrupt_handle().interrupt();
    let err = cursor.next(&ctx).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
}

fn interrupted_before_first_match(selection: &Selection, text: &str) -> ErrorKind {
    let tokenizer = StandardTokenizer::default();
    let store = store(text);
    let ctx = EvalContext::default();
    ctx.interrupt_handle().interrupt();

    let mut ft = FtContext::new(&store, &tokenizer, CasePolicy::Fold);
    let mut cursor = selection.execute(&mut ft).unwrap();
    cursor.next(&ctx).unwrap_err().kind()
}

#[test]
fn test_mild_not_drain_observes_cancellation() {
    init();
    let selection = Selection::mild_not(Selection::word("cat"), Selection::word("dog"));
    assert_eq!(interrupted_before_first_match(&selection, "cat dog dog dog"), ErrorKind::Cancelled);
}

#[test]
fn test_rejecting_cursors_observe_cancellation() {
    init();
    let inverted = Selection::order(Selection::and(vec![Selection::word("jumps"), Selection::word("fox")]));
    assert_eq!(interrupted_before_first_match(&inverted, "fox jumps"), ErrorKind::Cancelled);

    let split = Selection::scope(
        Selection::and(vec![Selection::word("cat"), Selection::word("dog")]),
        ScopeKind::Same,
        Unit::Sentence,
    );
    assert_eq!(interrupted_before_first_match(&split, "The cat sat. The dog ran."), ErrorKind::Cancelled);

    let far = Selection::distance(
        Selection::and(vec![Selection::word("alpha"), Selection::word("omega")]),
        Range::Exactly(0),
        Unit::Word,
    );
    assert_eq!(interrupted_before_first_match(&far, "alpha x y omega"), ErrorKind::Cancelled);
}

#[test]
fn test_content_reject_loop_observes_cancellation() {
    init();
    // ftnot without matches yields one empty match, which has no start token
    let selection = Selection::content(Selection::not(Selection::word("zebra")), ContentKind::AtStart);
    assert_eq!(interrupted_before_first_match(&selection, "no stripes here"), ErrorKind::Cancelled);
}

#[test]
fn test_wrapped_line_is_one_sentence() {
    init();
    let tokenizer = StandardTokenizer::default();
    let selection = Selection::scope(
        Selection::and(vec![Selection::word("quick"), Selection::word("fox")]),
        ScopeKind::Same,
        Unit::Sentence,
    );

    let wrapped = store("The quick\nbrown fox");
    assert_eq!(include_positions(&run(&selection, &wrapped, &tokenizer)), vec![vec![1, 3]]);

    let two_sentences = store("The quick.\nBrown fox");
    assert!(run(&selection, &two_sentences, &tokenizer).is_empty());
}
