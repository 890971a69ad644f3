//! `ASYNC`/`AWAIT`/`CHECK`/`TICKS`, `TIMER`/`SLEEP`: task and timer handles
//! obtained entirely through `eval`.

use glyphlang::{Evaluator, EvaluatorConfig};
use pretty_assertions::assert_eq;

const STORE: char = '\u{25BC}';
const PLACEHOLDER: char = '\u{25A1}';
const RETRIEVE: char = '\u{25B2}';
const EXECUTE: char = '\u{25B6}';
const TERM: char = '\u{25C6}';

fn exec(e: &Evaluator, call: &str) -> String {
    e.eval(&format!("{EXECUTE}{call}{TERM}")).unwrap().as_text()
}

#[test]
fn async_task_runs_on_a_fork_and_await_returns_its_result() {
    let e = Evaluator::new(EvaluatorConfig::default());
    e.eval(&format!(
        "{STORE}Double {PLACEHOLDER}n{EXECUTE}APPEND {RETRIEVE}n\n{RETRIEVE}n{TERM}{TERM}"
    ))
    .unwrap();

    let handle = exec(&e, "ASYNC Double\nhi");
    assert!(handle.starts_with("_async_"));
    assert_eq!(exec(&e, &format!("AWAIT {handle}")), "hihi");
    assert_eq!(exec(&e, &format!("CHECK {handle}")), "TRUE");
}

#[test]
fn async_task_does_not_leak_namespace_writes_back_to_the_caller() {
    let e = Evaluator::new(EvaluatorConfig::default());
    e.eval(&format!("\u{25BD}Shared parent{TERM}")).unwrap();
    e.eval(&format!("{STORE}SetShared \u{25BD}Shared child{TERM}{TERM}")).unwrap();

    let handle = exec(&e, "ASYNC SetShared");
    exec(&e, &format!("AWAIT {handle}"));

    assert_eq!(e.eval(&format!("{RETRIEVE}Shared{TERM}")).unwrap().as_text(), "parent");
}

#[test]
fn timer_ticks_down_then_reports_done() {
    let e = Evaluator::new(EvaluatorConfig::default());
    let handle = exec(&e, "TIMER 10");
    exec(&e, &format!("AWAIT {handle}"));
    assert_eq!(exec(&e, &format!("CHECK {handle}")), "TRUE");
    assert_eq!(exec(&e, &format!("TICKS {handle}")), "0");
}

#[test]
fn sleep_blocks_until_the_duration_elapses() {
    let e = Evaluator::new(EvaluatorConfig::default());
    let start = std::time::Instant::now();
    exec(&e, "SLEEP 20");
    assert!(start.elapsed() >= std::time::Duration::from_millis(15));
}

#[test]
fn check_on_an_unknown_handle_is_false() {
    let e = Evaluator::new(EvaluatorConfig::default());
    assert_eq!(exec(&e, "CHECK _async_999999"), "FALSE");
}
