//! End-to-end coverage of the builtin surface through `Evaluator::eval`.

use glyphlang::{CollectOutput, Evaluator, EvaluatorConfig, Expression, FixedInput};
use pretty_assertions::assert_eq;

const IMM_STORE: char = '\u{25BD}';
const EXECUTE: char = '\u{25B6}';
const TERM: char = '\u{25C6}';

fn exec(e: &Evaluator, call: &str) -> String {
    e.eval(&format!("{EXECUTE}{call}{TERM}")).unwrap().as_text()
}

#[test]
fn if_picks_the_branch_named_by_the_condition() {
    let e = Evaluator::new(EvaluatorConfig::default());
    assert_eq!(exec(&e, "IF TRUE\nyes\nno"), "yes");
    assert_eq!(exec(&e, "IF FALSE\nyes\nno"), "no");
}

#[test]
fn foreach_binds_only_the_first_placeholder_per_call() {
    let e = Evaluator::new(EvaluatorConfig::default());
    e.eval(&format!("{IMM_STORE}Items a\nb\nc{TERM}")).unwrap();
    e.eval(&format!("\u{25BC}Shout \u{25A1}word{EXECUTE}UPPER \u{25B2}word{TERM}{TERM}")).unwrap();
    assert_eq!(exec(&e, "FOREACH Items\nShout"), "A\nB\nC");
}

#[test]
fn read_pulls_one_line_at_a_time_from_fixed_input() {
    let e = Evaluator::new(EvaluatorConfig::default()).with_input(Box::new(FixedInput::new(["first", "second"])));
    assert_eq!(exec(&e, "READ"), "first");
    assert_eq!(exec(&e, "READ"), "second");
    assert_eq!(exec(&e, "READ"), "");
}

#[test]
fn say_collects_into_the_injected_writer_and_returns_its_text() {
    let e = Evaluator::new(EvaluatorConfig::default()).with_output(Box::new(CollectOutput::new()));
    assert_eq!(exec(&e, "SAY hi there"), "hi\nthere");
}

#[test]
fn text_builtins_compose() {
    let e = Evaluator::new(EvaluatorConfig::default());
    assert_eq!(exec(&e, "COUNT hello"), "1");
    assert_eq!(exec(&e, "COUNT a\nb"), "2");
    e.eval(&format!("{IMM_STORE}Log foo{TERM}")).unwrap();
    assert_eq!(exec(&e, "APPEND Log\nbar"), "foo\nbar");
    assert_eq!(exec(&e, "UPPER hi"), "HI");
    assert_eq!(exec(&e, "LOWER HI"), "hi");
    assert_eq!(exec(&e, "TRIM   padded  "), "padded");
}

#[test]
fn unknown_builtin_name_falls_through_to_an_undefined_name_lookup() {
    let e = Evaluator::new(EvaluatorConfig::default());
    assert_eq!(e.eval(&format!("{EXECUTE}NoSuchThing{TERM}")).unwrap(), Expression::Empty);
}

#[test]
fn system_setting_round_trips_and_rejects_unknown_keys() {
    let e = Evaluator::new(EvaluatorConfig::default());
    assert_eq!(exec(&e, "SYSTEM TEMPERATURE"), "0.7");
    e.eval(&format!("{EXECUTE}SYSTEM TEMPERATURE\n0.1{TERM}")).unwrap();
    assert_eq!(exec(&e, "SYSTEM TEMPERATURE"), "0.1");
    assert_eq!(exec(&e, "SYSTEM NOT_A_REAL_SETTING"), "UNKNOWN_SETTING");
}

#[test]
fn prompt_without_a_configured_provider_is_empty() {
    let e = Evaluator::new(EvaluatorConfig::default());
    assert_eq!(e.eval(&format!("{EXECUTE}PROMPT sys\nusr{TERM}")).unwrap(), Expression::Empty);
}
