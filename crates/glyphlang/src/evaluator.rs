//! The streaming evaluator: body-scanning routines, phased execute, dynamic
//! name resolution, and ephemeral rewrite.
//!
//! There are exactly two ways a region of source text is processed:
//!
//! - [`Mode::Full`]: every operator fires as encountered (top-level program
//!   evaluation, and the EXECUTE phase of a stored definition).
//! - [`Mode::Rewrite`]: only immediate operators (`△`, `▷`, `▽`) fire; `▲`,
//!   `▶`, `▼` survive untouched (the PARSE phase of EXECUTE, and the body
//!   rewrite RETRIEVE performs on every firing).
//!
//! A `◯` defer scope suppresses *all* firing inside it, in either mode —
//! that is the entire point of defer: it is a parse-time gate, not a
//! runtime one (§9 "Defer counter vs. recursion").

use std::sync::{Arc, Mutex, RwLock};

use crate::args;
use crate::asyncio::AsyncRegistry;
use crate::config::{EvaluatorConfig, PersistMode};
use crate::corpus::{CorpusRegistry, CorpusStore};
use crate::error::{EvalError, EvaluationError, ParseError};
use crate::expression::Expression;
use crate::io::{InputReader, NoInput, NoOutput, OutputWriter, StdInput, StdOutput};
use crate::namespace::Namespace;
use crate::provider::{EmbeddingProvider, LlmProvider, ProviderFactory};
use crate::scanner::Scanner;
use crate::settings::Settings;
use crate::store::HistoryStore;
use crate::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Full,
    Rewrite,
}

/// The evaluator: namespace, optional collaborators, and live settings.
pub struct Evaluator {
    namespace: Namespace,
    store: Option<Arc<dyn HistoryStore>>,
    provider: RwLock<Option<Arc<dyn LlmProvider>>>,
    input: Mutex<Box<dyn InputReader + Send>>,
    output: Mutex<Box<dyn OutputWriter + Send>>,
    async_registry: Arc<AsyncRegistry>,
    corpus_registry: Arc<CorpusRegistry>,
    corpus_store: Option<Arc<dyn CorpusStore>>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    provider_factories: Arc<RwLock<std::collections::HashMap<String, Arc<dyn ProviderFactory>>>>,
    settings: Settings,
    recursion_limit: usize,
    history_limit: usize,
}

impl std::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("namespace", &self.namespace)
            .field("has_store", &self.store.is_some())
            .field("has_provider", &self.provider.read().expect("provider lock poisoned").is_some())
            .finish_non_exhaustive()
    }
}

impl Evaluator {
    #[must_use]
    pub fn new(config: EvaluatorConfig) -> Self {
        Self {
            namespace: Namespace::new(),
            store: None,
            provider: RwLock::new(None),
            input: Mutex::new(Box::new(StdInput)),
            output: Mutex::new(Box::new(StdOutput)),
            async_registry: Arc::new(AsyncRegistry::new()),
            corpus_registry: Arc::new(CorpusRegistry::new()),
            corpus_store: None,
            embedding_provider: None,
            provider_factories: Arc::default(),
            settings: Settings::seeded(config.initial_system_params),
            recursion_limit: config.recursion_limit,
            history_limit: config.history_limit,
        }
    }

    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn HistoryStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn with_provider(self, provider: Arc<dyn LlmProvider>) -> Self {
        *self.provider.write().expect("provider lock poisoned") = Some(provider);
        self
    }

    #[must_use]
    pub fn with_corpus_store(mut self, store: Arc<dyn CorpusStore>) -> Self {
        self.corpus_store = Some(store);
        self
    }

    #[must_use]
    pub fn with_embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    #[must_use]
    pub fn with_output(self, output: Box<dyn OutputWriter + Send>) -> Self {
        Self {
            output: Mutex::new(output),
            ..self
        }
    }

    #[must_use]
    pub fn with_input(self, input: Box<dyn InputReader + Send>) -> Self {
        Self {
            input: Mutex::new(input),
            ..self
        }
    }

    pub fn register_provider_factory(&self, factory: Arc<dyn ProviderFactory>) {
        self.provider_factories
            .write()
            .expect("provider factory lock poisoned")
            .insert(factory.name().to_owned(), factory);
    }

    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    #[must_use]
    pub(crate) fn async_registry(&self) -> &AsyncRegistry {
        &self.async_registry
    }

    #[must_use]
    pub(crate) fn corpus_registry(&self) -> &CorpusRegistry {
        &self.corpus_registry
    }

    #[must_use]
    pub(crate) fn corpus_store(&self) -> Option<&Arc<dyn CorpusStore>> {
        self.corpus_store.as_ref()
    }

    #[must_use]
    pub(crate) fn embedding_provider(&self) -> Option<&Arc<dyn EmbeddingProvider>> {
        self.embedding_provider.as_ref()
    }

    #[must_use]
    pub(crate) fn store(&self) -> Option<&Arc<dyn HistoryStore>> {
        self.store.as_ref()
    }

    #[must_use]
    pub(crate) fn provider(&self) -> Option<Arc<dyn LlmProvider>> {
        self.provider.read().expect("provider lock poisoned").clone()
    }

    #[must_use]
    pub(crate) fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub(crate) fn history_limit(&self) -> usize {
        self.history_limit
    }

    pub(crate) fn provider_factory(&self, name: &str) -> Option<Arc<dyn ProviderFactory>> {
        self.provider_factories.read().expect("provider factory lock poisoned").get(name).cloned()
    }

    pub(crate) fn set_provider(&self, provider: Arc<dyn LlmProvider>) {
        *self.provider.write().expect("provider lock poisoned") = Some(provider);
    }

    pub(crate) fn say(&self, text: &str) -> Result<(), EvalError> {
        self.output.lock().expect("output lock poisoned").say(text)
    }

    pub(crate) fn read_line(&self) -> Result<String, EvalError> {
        self.input.lock().expect("input lock poisoned").read_line()
    }

    fn persist_mode(&self) -> PersistMode {
        self.settings
            .get("PERSIST_MODE")
            .and_then(|v| PersistMode::parse(&v))
            .unwrap_or_default()
    }

    /// Top-level entry point: full evaluation of a program.
    pub fn eval(&self, source: &str) -> Result<Expression, EvalError> {
        self.process(source, Mode::Full, 0, 0)
    }

    /// Creates a child evaluator sharing store/provider/registries/settings
    /// but owning a cloned namespace snapshot and silent I/O (§4.3 "Forking
    /// for async").
    #[must_use]
    pub fn fork_for_async(&self) -> Self {
        Self {
            namespace: self.namespace.fork(),
            store: self.store.clone(),
            provider: RwLock::new(self.provider()),
            input: Mutex::new(Box::new(NoInput)),
            output: Mutex::new(Box::new(NoOutput)),
            async_registry: Arc::clone(&self.async_registry),
            corpus_registry: Arc::clone(&self.corpus_registry),
            corpus_store: self.corpus_store.clone(),
            embedding_provider: self.embedding_provider.clone(),
            provider_factories: Arc::clone(&self.provider_factories),
            settings: self.settings.clone(),
            recursion_limit: self.recursion_limit,
            history_limit: self.history_limit,
        }
    }

    fn check_recursion(&self, depth: usize) -> Result<(), EvalError> {
        if depth > self.recursion_limit {
            return Err(EvaluationError(format!("recursion limit of {} exceeded", self.recursion_limit)).into());
        }
        Ok(())
    }

    /// Collapses a whitespace-only text run containing a newline to a single
    /// `\n`; same-line whitespace is left untouched. Decided open question,
    /// see DESIGN.md.
    fn collapse_whitespace(text: &str) -> String {
        if text.contains('\n') && text.trim().is_empty() {
            "\n".to_owned()
        } else {
            text.to_owned()
        }
    }

    /// The shared processing loop for both full evaluation and immediate-only
    /// rewrite. See the module doc for what distinguishes the two modes.
    pub(crate) fn process(
        &self,
        text: &str,
        mode: Mode,
        defer_depth: usize,
        recursion_depth: usize,
    ) -> Result<Expression, EvalError> {
        self.check_recursion(recursion_depth)?;
        let mut scanner = Scanner::new(text);
        let mut parts = Vec::new();
        while let Some(item) = scanner.next_item()? {
            match item.token {
                Token::Text => parts.push(Expression::Text(Self::collapse_whitespace(&item.value))),
                Token::Terminator => {
                    // Stray terminators at the top level are tolerated.
                }
                Token::Placeholder => {
                    let name = scanner.scan_name();
                    parts.push(Expression::Placeholder(name));
                }
                Token::Defer => {
                    let (inner, closed) = scanner.scan_until_terminator(true);
                    if !closed {
                        return Err(ParseError {
                            message: "unterminated DEFER scope".into(),
                            line: item.line,
                        }
                        .into());
                    }
                    let result = self.process(&inner, mode, defer_depth + 1, recursion_depth + 1)?;
                    if defer_depth == 0 {
                        parts.push(result);
                    } else {
                        parts.push(Expression::Operator {
                            op: Token::Defer,
                            name: String::new(),
                            body: Some(result.to_source()),
                        });
                    }
                }
                Token::ImmStore => {
                    if defer_depth == 0 {
                        parts.push(self.store_immediate(&mut scanner, recursion_depth)?);
                    } else {
                        parts.push(self.preserve_scoped(&mut scanner, item.token)?);
                    }
                }
                Token::Store => {
                    if mode == Mode::Full && defer_depth == 0 {
                        parts.push(self.store_deferred(&mut scanner, mode, defer_depth, recursion_depth)?);
                    } else {
                        parts.push(self.preserve_scoped(&mut scanner, item.token)?);
                    }
                }
                Token::ImmRetrieve => {
                    if defer_depth == 0 {
                        let name = self.read_name(&mut scanner, mode, defer_depth, recursion_depth)?;
                        parts.push(self.retrieve(&name, recursion_depth + 1)?);
                    } else {
                        let name = scanner.scan_name();
                        parts.push(Expression::Operator { op: item.token, name, body: None });
                    }
                }
                Token::Retrieve => {
                    if mode == Mode::Full && defer_depth == 0 {
                        let name = self.read_name(&mut scanner, mode, defer_depth, recursion_depth)?;
                        parts.push(self.retrieve(&name, recursion_depth + 1)?);
                    } else {
                        let name = scanner.scan_name();
                        parts.push(Expression::Operator { op: item.token, name, body: None });
                    }
                }
                Token::ImmExecute => {
                    if defer_depth == 0 {
                        parts.push(self.do_execute(&mut scanner, mode, defer_depth, recursion_depth)?);
                    } else {
                        parts.push(self.preserve_scoped(&mut scanner, item.token)?);
                    }
                }
                Token::Execute => {
                    if mode == Mode::Full && defer_depth == 0 {
                        parts.push(self.do_execute(&mut scanner, mode, defer_depth, recursion_depth)?);
                    } else {
                        parts.push(self.preserve_scoped(&mut scanner, item.token)?);
                    }
                }
            }
        }
        Ok(Expression::new_compound(parts))
    }

    /// Captures a suppressed operator's scope verbatim, without evaluating
    /// anything inside it (used at `defer_depth > 0`, and for deferred
    /// operators while rewriting).
    fn preserve_scoped(&self, scanner: &mut Scanner, op: Token) -> Result<Expression, EvalError> {
        let name = scanner.scan_name();
        scanner.skip_inline_whitespace();
        let (body, closed) = scanner.scan_until_terminator(true);
        if !closed {
            return Err(ParseError {
                message: format!("unterminated {op} scope"),
                line: scanner.line(),
            }
            .into());
        }
        Ok(Expression::Operator { op, name, body: Some(body) })
    }

    /// Resolves the name in a store/retrieve/execute name position, which may
    /// itself be a retrieve or execute operator (dynamic naming, §9).
    fn read_name(
        &self,
        scanner: &mut Scanner,
        mode: Mode,
        defer_depth: usize,
        recursion_depth: usize,
    ) -> Result<String, EvalError> {
        self.check_recursion(recursion_depth)?;
        let Some(op) = scanner.peek_rune().and_then(Token::from_rune).filter(|t| t.can_name()) else {
            return Ok(scanner.scan_name());
        };
        scanner.consume_rune(op.rune());
        match op {
            Token::Retrieve | Token::ImmRetrieve => {
                let inner = self.read_name(scanner, mode, defer_depth, recursion_depth + 1)?;
                Ok(self.retrieve(&inner, recursion_depth + 1)?.as_text())
            }
            Token::Execute | Token::ImmExecute => {
                let target = scanner.scan_name();
                scanner.skip_inline_whitespace();
                let (args_raw, closed) = scanner.scan_until_terminator(true);
                if !closed {
                    return Err(ParseError {
                        message: "unterminated dynamic-name EXECUTE".into(),
                        line: scanner.line(),
                    }
                    .into());
                }
                Ok(self.execute(&target, &args_raw, recursion_depth + 1)?.as_text())
            }
            _ => unreachable!("Token::can_name() only returns the retrieve/execute family"),
        }
    }

    fn store_immediate(&self, scanner: &mut Scanner, recursion_depth: usize) -> Result<Expression, EvalError> {
        let name = self.read_name(scanner, Mode::Rewrite, 0, recursion_depth)?;
        scanner.skip_inline_whitespace();
        let (raw_body, closed) = scanner.scan_until_terminator(true);
        if !closed {
            return Err(ParseError {
                message: "unterminated IMM_STORE scope".into(),
                line: scanner.line(),
            }
            .into());
        }
        let value = self.process(&raw_body, Mode::Rewrite, 0, recursion_depth + 1)?;
        self.namespace.set(&name, value);
        self.maybe_auto_persist(&name)?;
        Ok(Expression::Empty)
    }

    fn store_deferred(
        &self,
        scanner: &mut Scanner,
        mode: Mode,
        defer_depth: usize,
        recursion_depth: usize,
    ) -> Result<Expression, EvalError> {
        let name = self.read_name(scanner, mode, defer_depth, recursion_depth)?;
        scanner.skip_inline_whitespace();
        let (raw_body, closed) = scanner.scan_until_terminator(true);
        if !closed {
            return Err(ParseError {
                message: "unterminated STORE scope".into(),
                line: scanner.line(),
            }
            .into());
        }
        let (params, body) = analyze_body(&raw_body);
        self.namespace.set(&name, Expression::Stored { params, body });
        self.maybe_auto_persist(&name)?;
        Ok(Expression::Empty)
    }

    /// Shared retrieve logic for `▲`/`△`: rewrites the stored value's body
    /// with immediate-only rewrite and writes the rewritten value back
    /// (the ephemeral-body rule applied to the *retrieved* definition).
    ///
    /// A `Stored` value with no declared placeholders is not a template —
    /// it is a plain value that happened to be defined with the deferred
    /// operator. Retrieving it fully evaluates the body and returns that
    /// result directly, so `▲X` yields `X`'s plain value rather than a
    /// `▼body◆`-wrapped source string. A `Stored` value with placeholders
    /// stays a template, awaiting `EXECUTE`.
    pub(crate) fn retrieve(&self, name: &str, recursion_depth: usize) -> Result<Expression, EvalError> {
        let current = self.namespace.get(name);
        let rewritten = match current {
            Expression::Stored { params, body } if params.is_empty() => {
                self.process(&body, Mode::Full, 0, recursion_depth + 1)?
            }
            Expression::Stored { params, body } => {
                let new_body = self.process(&body, Mode::Rewrite, 0, recursion_depth + 1)?.to_source();
                Expression::Stored { params, body: new_body }
            }
            other => self.process(&other.to_source(), Mode::Rewrite, 0, recursion_depth + 1)?,
        };
        self.namespace.set(name, rewritten.clone());
        self.maybe_auto_persist(name)?;
        Ok(rewritten)
    }

    fn do_execute(
        &self,
        scanner: &mut Scanner,
        mode: Mode,
        defer_depth: usize,
        recursion_depth: usize,
    ) -> Result<Expression, EvalError> {
        let name = self.read_name(scanner, mode, defer_depth, recursion_depth)?;
        scanner.skip_inline_whitespace();
        let (args_raw, closed) = scanner.scan_until_terminator(true);
        if !closed {
            return Err(ParseError {
                message: "unterminated EXECUTE scope".into(),
                line: scanner.line(),
            }
            .into());
        }
        self.execute(&name, &args_raw, recursion_depth + 1)
    }

    /// Invokes a builtin or runs the phased LOAD/PARSE/POPULATE/EXECUTE
    /// cycle against a user-defined `Stored` value.
    pub(crate) fn execute(&self, name: &str, args_raw: &str, recursion_depth: usize) -> Result<Expression, EvalError> {
        self.check_recursion(recursion_depth)?;
        if let Some(builtin) = crate::builtins::lookup(name) {
            return builtin(self, args_raw, recursion_depth);
        }
        let Expression::Stored { params, body } = self.namespace.get(name) else {
            return Ok(Expression::Empty);
        };
        let rewritten_body = self.process(&body, Mode::Rewrite, 0, recursion_depth + 1)?.to_source();
        self.namespace.set(name, Expression::Stored { params: params.clone(), body: rewritten_body.clone() });
        self.maybe_auto_persist(name)?;
        let args = self.parse_args(args_raw, recursion_depth + 1)?;
        for (param, value) in params.iter().zip(args.iter()) {
            self.namespace.set(param, Expression::from(value.clone()));
        }
        self.process(&rewritten_body, Mode::Full, 0, recursion_depth + 1)
    }

    pub(crate) fn parse_args(&self, raw: &str, recursion_depth: usize) -> Result<Vec<String>, EvalError> {
        args::parse_arguments(raw, |token, name, body| {
            let expr = match token {
                Token::Retrieve | Token::ImmRetrieve => self.retrieve(name, recursion_depth + 1)?,
                Token::Execute | Token::ImmExecute => {
                    self.execute(name, body.unwrap_or_default(), recursion_depth + 1)?
                }
                _ => unreachable!("args callback only invoked for retrieve/execute tokens"),
            };
            Ok(expr.as_text())
        })
    }

    fn maybe_auto_persist(&self, name: &str) -> Result<(), EvalError> {
        if self.persist_mode() == PersistMode::Always {
            if let Some(store) = &self.store {
                store.put(name, self.namespace.get(name))?;
            }
        }
        Ok(())
    }
}

/// Extracts the leading run of placeholder declarations from a raw STORE
/// body, leaving the remainder as the unexecuted body text. Leading
/// whitespace-only formatting between the name and the first placeholder is
/// tolerated and dropped; anything else stops the extraction.
fn analyze_body(raw: &str) -> (Vec<String>, String) {
    let mut scanner = Scanner::new(raw);
    let mut params = Vec::new();
    loop {
        let checkpoint = scanner.clone();
        match scanner.next_item() {
            Ok(Some(item)) if item.token == Token::Placeholder => {
                params.push(scanner.scan_name());
            }
            Ok(Some(item)) if item.token == Token::Text && item.value.trim().is_empty() => {}
            _ => {
                scanner = checkpoint;
                break;
            }
        }
    }
    (params, scanner.remaining())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn eval(source: &str) -> Expression {
        Evaluator::new(EvaluatorConfig::default()).eval(source).unwrap()
    }

    #[test]
    fn scenario_1_parse_time_capture() {
        let e = Evaluator::new(EvaluatorConfig::default());
        e.eval("\u{25BD}X first\u{25C6}").unwrap();
        e.eval("\u{25BD}Snapshot \u{25B3}X\u{25C6}").unwrap();
        e.eval("\u{25BD}X second\u{25C6}").unwrap();
        assert_eq!(e.retrieve("Snapshot", 0).unwrap().as_text(), "first");
        assert_eq!(e.retrieve("X", 0).unwrap().as_text(), "second");
    }

    #[test]
    fn scenario_2_execution_time_retrieval() {
        let e = Evaluator::new(EvaluatorConfig::default());
        e.eval("\u{25BC}Expression Current value: \u{25B2}X\u{25C6}").unwrap();
        e.eval("\u{25BD}X first\u{25C6}").unwrap();
        assert_eq!(e.execute("Expression", "", 0).unwrap().as_text(), "Current value: first");
        e.eval("\u{25BD}X second\u{25C6}").unwrap();
        assert_eq!(e.execute("Expression", "", 0).unwrap().as_text(), "Current value: second");
    }

    #[test]
    fn scenario_3_defer() {
        let e = Evaluator::new(EvaluatorConfig::default());
        e.eval("\u{25BD}Template \u{25EF}\u{25B3}X\u{25C6}\u{25C6}").unwrap();
        e.eval("\u{25BD}X first\u{25C6}").unwrap();
        assert_eq!(e.retrieve("Template", 0).unwrap().as_text(), "first");
        assert_eq!(e.retrieve("Template", 0).unwrap().as_text(), "first");
    }

    #[test]
    fn scenario_4_dynamic_naming() {
        let e = Evaluator::new(EvaluatorConfig::default());
        e.eval("\u{25BD}FieldName X\u{25C6}").unwrap();
        e.eval("\u{25BD}\u{25B2}FieldName hello\u{25C6}").unwrap();
        assert_eq!(e.retrieve("X", 0).unwrap().as_text(), "hello");
    }

    /// Same scenario as `scenario_4_dynamic_naming`, but with literal STORE
    /// (`▼`) for both the field-name definition and the outer store, as
    /// worded in the written-up example. A param-less `Stored` indirection
    /// target must resolve to its plain value, not its `▼body◆` source.
    #[test]
    fn scenario_4_dynamic_naming_via_store() {
        let e = Evaluator::new(EvaluatorConfig::default());
        e.eval("\u{25BC}FieldName X\u{25C6}").unwrap();
        e.eval("\u{25BC}\u{25B2}FieldName hello\u{25C6}").unwrap();
        assert_eq!(e.retrieve("X", 0).unwrap().as_text(), "hello");
    }

    #[test]
    fn scenario_5_argument_separation() {
        let e = Evaluator::new(EvaluatorConfig::default());
        e.eval("\u{25BD}A foo\u{25C6}").unwrap();
        e.eval("\u{25BD}B foo\u{25C6}").unwrap();
        assert_eq!(eval_with(&e, "\u{25B6}COMPARE \u{25B2}A \u{25B2}B\u{25C6}"), "TRUE");
        e.eval("\u{25BD}B bar\u{25C6}").unwrap();
        assert_eq!(eval_with(&e, "\u{25B6}COMPARE \u{25B2}A \u{25B2}B\u{25C6}"), "FALSE");
    }

    fn eval_with(e: &Evaluator, source: &str) -> String {
        e.eval(source).unwrap().as_text()
    }

    #[test]
    fn scenario_6_versioning_and_rollback() {
        let e = Evaluator::new(EvaluatorConfig::default()).with_store(InMemoryStore::new());
        for v in ["first", "second", "third"] {
            e.eval(&format!("\u{25BD}X {v}\u{25C6}")).unwrap();
            e.store().unwrap().put("X", e.namespace().get("X")).unwrap();
        }
        let history = eval_with(&e, "\u{25B6}HISTORY X\u{25C6}");
        assert_eq!(history, "_X_3\n_X_2\n_X_1");
        e.eval("\u{25B6}_X_1\u{25C6}").unwrap();
        assert_eq!(e.retrieve("X", 0).unwrap().as_text(), "first");
    }

    #[test]
    fn fork_isolates_namespace_writes() {
        let parent = Evaluator::new(EvaluatorConfig::default());
        parent.eval("\u{25BD}X before\u{25C6}").unwrap();
        let child = parent.fork_for_async();
        child.eval("\u{25BD}X child\u{25C6}").unwrap();
        parent.eval("\u{25BD}Y parent-only\u{25C6}").unwrap();
        assert_eq!(parent.retrieve("X", 0).unwrap().as_text(), "before");
        assert_eq!(child.retrieve("X", 0).unwrap().as_text(), "child");
        assert_eq!(child.retrieve("Y", 0).unwrap(), Expression::Empty);
    }

    #[test]
    fn stray_terminators_are_tolerated() {
        assert_eq!(eval("a\u{25C6}b"), Expression::Text("ab".into()));
    }

    #[test]
    fn whitespace_only_newline_runs_collapse() {
        let e = Evaluator::new(EvaluatorConfig::default());
        e.eval("\u{25BD}X a\u{25C6}").unwrap();
        e.eval("\u{25BD}Y b\u{25C6}").unwrap();
        let result = e.eval("\u{25B2}X\n\n\n\u{25B2}Y").unwrap();
        assert_eq!(result.as_text(), "a\nb");
    }
}
