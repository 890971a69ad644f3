//! `Evaluator::fork_for_async` isolation: a forked evaluator starts from a
//! snapshot of the parent's namespace but diverges independently from then on.

use glyphlang::{Evaluator, EvaluatorConfig, Expression};
use pretty_assertions::assert_eq;

const IMM_STORE: char = '\u{25BD}';
const RETRIEVE: char = '\u{25B2}';
const TERM: char = '\u{25C6}';

fn get(e: &Evaluator, name: &str) -> Expression {
    e.eval(&format!("{RETRIEVE}{name}{TERM}")).unwrap()
}

#[test]
fn fork_sees_writes_made_before_the_fork() {
    let parent = Evaluator::new(EvaluatorConfig::default());
    parent.eval(&format!("{IMM_STORE}X before{TERM}")).unwrap();

    let child = parent.fork_for_async();
    assert_eq!(get(&child, "X").as_text(), "before");
}

#[test]
fn writes_in_either_evaluator_after_fork_stay_isolated() {
    let parent = Evaluator::new(EvaluatorConfig::default());
    parent.eval(&format!("{IMM_STORE}X before{TERM}")).unwrap();
    let child = parent.fork_for_async();

    child.eval(&format!("{IMM_STORE}X child{TERM}")).unwrap();
    parent.eval(&format!("{IMM_STORE}Y parent-only{TERM}")).unwrap();

    assert_eq!(get(&parent, "X").as_text(), "before");
    assert_eq!(get(&child, "X").as_text(), "child");
    assert_eq!(get(&child, "Y"), Expression::Empty);
}

#[test]
fn forks_of_forks_each_diverge_independently() {
    let root = Evaluator::new(EvaluatorConfig::default());
    root.eval(&format!("{IMM_STORE}X 1{TERM}")).unwrap();

    let a = root.fork_for_async();
    a.eval(&format!("{IMM_STORE}X 2{TERM}")).unwrap();

    let b = a.fork_for_async();
    b.eval(&format!("{IMM_STORE}X 3{TERM}")).unwrap();

    assert_eq!(get(&root, "X").as_text(), "1");
    assert_eq!(get(&a, "X").as_text(), "2");
    assert_eq!(get(&b, "X").as_text(), "3");
}

#[test]
fn forked_evaluators_are_silenced_for_say_and_read() {
    let parent = Evaluator::new(EvaluatorConfig::default());
    let child = parent.fork_for_async();

    let say_result = child.eval(&format!("\u{25B6}SAY quiet{TERM}")).unwrap();
    assert_eq!(say_result.as_text(), "quiet");
    assert_eq!(child.eval(&format!("\u{25B6}READ{TERM}")).unwrap(), Expression::Empty);
}
