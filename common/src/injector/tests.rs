//! Unit tests for the injector operations and their fallback policy.

use super::*;
use crate::document::temp_sibling;
use rstest::{fixture, rstest};
use std::fs;
use tempfile::TempDir;

/// Scratch directory holding one target file.
struct Scratch {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl Scratch {
    fn with_content(content: &str) -> Self {
        let scratch = Self::empty();
        fs::write(&scratch.path, content).expect("seed target file");
        scratch
    }

    fn empty() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("utf-8 temp dir");
        Self {
            _dir: dir,
            path: root.join("target.txt"),
        }
    }

    fn read(&self) -> String {
        fs::read_to_string(&self.path).expect("read target file")
    }

    fn injector(&self) -> Injector {
        Injector::open(self.path.clone()).expect("open injector")
    }
}

#[fixture]
fn abc() -> Scratch {
    Scratch::with_content("A\nB\nC\n")
}

#[rstest]
fn inject_between_replaces_the_region_between_anchors(abc: Scratch) {
    let mut injector = abc.injector();

    let outcome = injector
        .inject_between(["X\n"], "A\n", "C\n")
        .expect("inject");

    assert_eq!(outcome, Outcome::Applied(Applied::Spliced));
    assert_eq!(abc.read(), "A\nX\nC\n");
}

#[rstest]
fn inject_between_keeps_anchor_lines_exactly_once() {
    let scratch = Scratch::with_content("head\n# START\nold 1\nold 2\n# END\ntail\n");
    let mut injector = scratch.injector();
    injector.set_match_mode(MatchMode::Contains);

    injector
        .inject_between(vec!["new\n"], "START", "END")
        .expect("inject");

    assert_eq!(scratch.read(), "head\n# START\nnew\n# END\ntail\n");
}

#[rstest]
fn inject_between_with_adjacent_anchors_inserts(abc: Scratch) {
    let mut injector = abc.injector();

    injector
        .inject_between(["X\n"], "A\n", "B\n")
        .expect("inject");

    assert_eq!(abc.read(), "A\nX\nB\nC\n");
}

#[rstest]
fn inject_after_twice_inserts_twice() {
    // Anchors survive an injection, so a repeated call finds them again and
    // inserts a second copy. Callers de-duplicate themselves.
    let scratch = Scratch::with_content("A\nB\n");
    let mut injector = scratch.injector();
    injector.set_match_mode(MatchMode::Contains);

    injector.inject_after("X\n", "A").expect("first inject");
    injector.inject_after("X\n", "A").expect("second inject");

    assert_eq!(scratch.read(), "A\nX\nX\nB\n");
}

#[rstest]
fn inject_between_twice_finds_anchors_again(abc: Scratch) {
    let mut injector = abc.injector();

    let first = injector
        .inject_between(["X\n"], "A\n", "C\n")
        .expect("first inject");
    let second = injector
        .inject_between(["X\n"], "A\n", "C\n")
        .expect("second inject");

    assert!(first.is_applied());
    assert!(second.is_applied());
    assert_eq!(abc.read(), "A\nX\nC\n");
}

#[rstest]
#[case::missing_start("Q\n", "C\n", SkipReason::StartAnchorNotFound)]
#[case::missing_end("A\n", "Q\n", SkipReason::EndAnchorNotFound)]
fn inject_between_without_force_skips_and_leaves_file(
    abc: Scratch,
    #[case] start: &str,
    #[case] end: &str,
    #[case] reason: SkipReason,
) {
    let mut injector = abc.injector();
    injector.set_force(false);
    injector.set_suppress_warnings(true);

    let outcome = injector.inject_between(["X\n"], start, end).expect("inject");

    assert_eq!(outcome, Outcome::Skipped(reason));
    assert_eq!(abc.read(), "A\nB\nC\n");
}

#[rstest]
#[case::missing_start("Q\n", "C\n")]
#[case::missing_end("A\n", "Q\n")]
fn inject_between_with_force_appends_when_anchor_missing(
    abc: Scratch,
    #[case] start: &str,
    #[case] end: &str,
) {
    let mut injector = abc.injector();

    let outcome = injector.inject_between(["X\n"], start, end).expect("inject");

    assert_eq!(outcome, Outcome::Applied(Applied::Appended));
    assert_eq!(abc.read(), "A\nB\nC\nX\n");
}

#[rstest]
fn inject_between_rejects_end_before_start_even_with_force(abc: Scratch) {
    let mut injector = abc.injector();

    let outcome = injector
        .inject_between(["X\n"], "C\n", "A\n")
        .expect("inject");

    assert_eq!(outcome, Outcome::Skipped(SkipReason::EndBeforeStart));
    assert_eq!(abc.read(), "A\nB\nC\n");
}

#[rstest]
fn inject_between_contains_rejects_anchors_on_the_same_line() {
    let scratch = Scratch::with_content("x\nSTART END\ny\n");
    let mut injector = scratch.injector();
    injector.set_match_mode(MatchMode::Contains);
    injector.set_force(false);

    let outcome = injector
        .inject_between(["X\n"], "START", "END")
        .expect("inject");

    assert_eq!(outcome, Outcome::Skipped(SkipReason::EndBeforeStart));
}

#[rstest]
fn inject_between_contains_searches_end_after_start() {
    let scratch = Scratch::with_content("END\nSTART\nold\nEND\n");
    let mut injector = scratch.injector();
    injector.set_match_mode(MatchMode::Contains);

    injector
        .inject_between(["new\n"], "START", "END")
        .expect("inject");

    assert_eq!(scratch.read(), "END\nSTART\nnew\nEND\n");
}

#[rstest]
fn inject_between_backward_targets_the_last_bracket() {
    let scratch = Scratch::with_content("S\none\nE\nS\ntwo\nE\n");
    let mut injector = scratch.injector();
    injector.set_match_mode(MatchMode::Contains);
    injector.set_search_direction(SearchDirection::Backward);

    injector.inject_between(["X\n"], "S", "E").expect("inject");

    assert_eq!(scratch.read(), "S\none\nE\nS\nX\nE\n");
}

#[rstest]
fn inject_after_backward_matches_forward_on_the_last_occurrence() {
    let backward = Scratch::with_content("A\nmid\nA\ntail\n");
    let forward = Scratch::with_content("A\nmid\nA\ntail\n");

    let mut injector = backward.injector();
    injector.set_search_direction(SearchDirection::Backward);
    injector.inject_after("X\n", "A\n").expect("backward inject");

    // The forward equivalent targets the last "A" explicitly by context.
    let mut injector = forward.injector();
    injector.set_match_mode(MatchMode::Contains);
    injector
        .inject_between(["A\n", "X\n"], "mid", "tail")
        .expect("forward inject");

    assert_eq!(backward.read(), "A\nmid\nA\nX\ntail\n");
    assert_eq!(backward.read(), forward.read());
}

#[rstest]
#[case::forward(SearchDirection::Forward, "A\nX\nB\nA\n")]
#[case::backward(SearchDirection::Backward, "A\nB\nA\nX\n")]
fn inject_after_respects_direction(#[case] direction: SearchDirection, #[case] expected: &str) {
    let scratch = Scratch::with_content("A\nB\nA\n");
    let mut injector = scratch.injector();
    injector.set_search_direction(direction);

    injector.inject_after("X\n", "A\n").expect("inject");

    assert_eq!(scratch.read(), expected);
}

#[rstest]
#[case::first_line("A\n", "X\nA\nB\nC\n")]
#[case::middle_line("B\n", "A\nX\nB\nC\n")]
fn inject_before_supports_every_position(
    abc: Scratch,
    #[case] anchor: &str,
    #[case] expected: &str,
) {
    let mut injector = abc.injector();

    let outcome = injector.inject_before("X\n", anchor).expect("inject");

    assert_eq!(outcome, Outcome::Applied(Applied::Spliced));
    assert_eq!(abc.read(), expected);
}

#[rstest]
#[case::first_line("A\n", "X\nB\nC\n")]
#[case::last_line("C\n", "A\nB\nX\n")]
fn replace_single_line_supports_every_position(
    abc: Scratch,
    #[case] anchor: &str,
    #[case] expected: &str,
) {
    let mut injector = abc.injector();

    injector.replace_single_line("X", anchor).expect("replace");

    assert_eq!(abc.read(), expected);
}

#[rstest]
fn replace_single_line_keeps_sequences_verbatim(abc: Scratch) {
    let mut injector = abc.injector();

    injector
        .replace_single_line(vec!["X", "Y\n"], "B\n")
        .expect("replace");

    assert_eq!(abc.read(), "A\nXY\nC\n");
}

#[rstest]
fn replace_string_substitutes_every_occurrence() {
    let scratch = Scratch::with_content(concat!(
        "project(--BLUEPRINT--PLUGIN_NAME--)\n",
        "add_library(--BLUEPRINT--PLUGIN_NAME-- --BLUEPRINT--PLUGIN_NAME--.cpp)\n",
    ));
    let mut injector = scratch.injector();
    injector.set_search_direction(SearchDirection::Backward);

    let outcome = injector
        .replace_string("hello", "--BLUEPRINT--PLUGIN_NAME--")
        .expect("replace");

    assert_eq!(outcome, Outcome::Applied(Applied::Replaced));
    assert_eq!(
        scratch.read(),
        "project(hello)\nadd_library(hello hello.cpp)\n"
    );
}

#[rstest]
#[case::absent("zzz")]
#[case::empty("")]
fn replace_string_without_change_is_skipped_and_byte_identical(abc: Scratch, #[case] old: &str) {
    let before = fs::read(&abc.path).expect("read bytes");
    let mut injector = abc.injector();

    let outcome = injector.replace_string("new", old).expect("replace");

    assert_eq!(outcome, Outcome::Skipped(SkipReason::NoChange));
    assert_eq!(fs::read(&abc.path).expect("read bytes"), before);
}

#[rstest]
fn replace_string_on_missing_file_is_skipped_even_with_force() {
    let scratch = Scratch::empty();
    let mut injector = scratch.injector();

    let outcome = injector.replace_string("new", "old").expect("replace");

    assert_eq!(outcome, Outcome::Skipped(SkipReason::FileNotFound));
    assert!(!scratch.path.exists());
}

#[rstest]
fn replace_all_overwrites_everything(abc: Scratch) {
    let mut injector = abc.injector();

    injector.replace_all(["only\n"]).expect("replace");

    assert_eq!(abc.read(), "only\n");
}

#[rstest]
fn open_does_not_create_missing_file() {
    let scratch = Scratch::empty();

    let injector = scratch.injector();

    assert!(injector.document().is_empty());
    assert!(!scratch.path.exists());
}

#[rstest]
fn missing_file_is_created_with_exactly_the_content_when_forced() {
    let scratch = Scratch::empty();
    let mut injector = scratch.injector();

    let outcome = injector.inject_after(["X\n", "Y\n"], "A\n").expect("inject");

    assert_eq!(outcome, Outcome::Applied(Applied::Created));
    assert_eq!(scratch.read(), "X\nY\n");
}

#[rstest]
fn missing_file_is_skipped_without_force() {
    let scratch = Scratch::empty();
    let mut injector = scratch.injector();
    injector.set_force(false);

    let outcome = injector
        .inject_between(["X\n"], "A\n", "C\n")
        .expect("inject");

    assert_eq!(outcome, Outcome::Skipped(SkipReason::FileNotFound));
    assert!(!scratch.path.exists());
}

#[rstest]
fn document_tracks_the_file_after_each_mutation(abc: Scratch) {
    let mut injector = abc.injector();

    injector.inject_after("X\n", "A\n").expect("inject");
    assert_eq!(injector.document().to_text(), abc.read());

    injector.replace_single_line("Y\n", "X\n").expect("replace");
    assert_eq!(injector.document().to_text(), abc.read());
    assert_eq!(abc.read(), "A\nY\nB\nC\n");
}

#[rstest]
fn no_temporary_file_remains_after_a_write(abc: Scratch) {
    let mut injector = abc.injector();

    injector.inject_after("X\n", "B\n").expect("inject");

    assert!(!temp_sibling(&abc.path).exists());
}

#[rstest]
fn set_file_path_reloads_the_document(abc: Scratch) {
    let other = Scratch::with_content("other\n");
    let mut injector = abc.injector();

    injector
        .set_file_path(other.path.clone())
        .expect("rebind");

    assert_eq!(injector.path(), other.path.as_path());
    assert_eq!(injector.document().lines(), ["other\n"]);
}

#[rstest]
fn defaults_are_forward_equal_and_forced(abc: Scratch) {
    let injector = abc.injector();

    assert_eq!(injector.search_direction(), SearchDirection::Forward);
    assert_eq!(injector.match_mode(), MatchMode::Equal);
    assert!(injector.force());
    assert!(!injector.suppress_warnings());
}

#[rstest]
#[case::equal(MatchMode::Equal, "# START\n", "# END\n")]
#[case::contains(MatchMode::Contains, "START\n", "END\n")]
fn crlf_files_match_lf_anchors_and_keep_crlf(
    #[case] mode: MatchMode,
    #[case] start: &str,
    #[case] end: &str,
) {
    let scratch = Scratch::with_content("x\r\n# START\r\nold\r\n# END\r\ny\r\n");
    let mut injector = scratch.injector();
    injector.set_match_mode(mode);
    injector.set_force(false);

    let outcome = injector
        .inject_between(["new\n"], start, end)
        .expect("inject");

    assert_eq!(outcome, Outcome::Applied(Applied::Spliced));
    assert_eq!(scratch.read(), "x\r\n# START\r\nnew\r\n# END\r\ny\r\n");
}

#[rstest]
fn inject_after_an_unterminated_last_line_starts_a_new_line() {
    let scratch = Scratch::with_content("A\nB");
    let mut injector = scratch.injector();

    injector.inject_after("X\n", "B").expect("inject");

    assert_eq!(scratch.read(), "A\nB\nX\n");
}

#[rstest]
fn fallback_append_after_an_unterminated_last_line_starts_a_new_line() {
    let scratch = Scratch::with_content("project(demo)");
    let mut injector = scratch.injector();
    injector.set_match_mode(MatchMode::Contains);

    let outcome = injector
        .inject_after("add_subdirectory(src/hello)\n", "# Plugin Subdirectories")
        .expect("inject");

    assert_eq!(outcome, Outcome::Applied(Applied::Appended));
    assert_eq!(scratch.read(), "project(demo)\nadd_subdirectory(src/hello)\n");
}

#[rstest]
#[case::found("A\n", "C\n", Ok((0, 2)))]
#[case::missing_start("Q\n", "C\n", Err(SkipReason::StartAnchorNotFound))]
#[case::missing_end("A\n", "Q\n", Err(SkipReason::EndAnchorNotFound))]
#[case::reversed("C\n", "A\n", Err(SkipReason::EndBeforeStart))]
fn locate_between_reports_without_writing(
    abc: Scratch,
    #[case] start: &str,
    #[case] end: &str,
    #[case] expected: std::result::Result<(usize, usize), SkipReason>,
) {
    let injector = abc.injector();

    assert_eq!(injector.locate_between(start, end), expected);
    assert_eq!(abc.read(), "A\nB\nC\n");
}

#[rstest]
fn locate_between_on_missing_file_is_file_not_found() {
    let scratch = Scratch::empty();

    let injector = scratch.injector();

    assert_eq!(
        injector.locate_between("A\n", "C\n"),
        Err(SkipReason::FileNotFound)
    );
}
