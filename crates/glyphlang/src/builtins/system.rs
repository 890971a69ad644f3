//! `PROMPT`, `GENERATE`, `EXTRACT`, `SYSTEM`.

use std::sync::Arc;

use crate::error::EvalError;
use crate::evaluator::Evaluator;
use crate::expression::Expression;

const KNOWN_SETTINGS: &[&str] = &[
    "PERSIST_MODE",
    "MODEL",
    "PROVIDER",
    "TEMPERATURE",
    "NUM_CTX",
    "TOP_K",
    "TOP_P",
    "MAX_TOKENS",
    "EMBED_MODEL",
    "SEARCH_LIMIT",
    "HISTORY_LIMIT",
];

/// `▶PROMPT system user◆`: a direct system/user chat-completion call.
pub(super) fn prompt(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let Some(provider) = e.provider() else {
        return Ok(Expression::Empty);
    };
    let system_text = args.first().cloned().unwrap_or_default();
    let user_text = args.get(1).cloned().unwrap_or_default();
    Ok(Expression::from(provider.prompt(&system_text, &user_text)?))
}

/// `▶GENERATE text◆`: a user-only completion, no system role.
pub(super) fn generate(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let Some(provider) = e.provider() else {
        return Ok(Expression::Empty);
    };
    Ok(Expression::from(provider.prompt("", &args.join("\n"))?))
}

/// `▶EXTRACT label text◆`: pulls the value of a `LABEL: value` line out of
/// `text` — a deterministic local parse, not a provider call. The label
/// match is case-insensitive; the value runs until the next line that itself
/// looks like a label line (`\S+:`), with intervening non-label lines kept
/// verbatim as part of the value.
pub(super) fn extract(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let Some(label) = args.first() else {
        return Ok(Expression::Empty);
    };
    if args.len() < 2 {
        return Ok(Expression::Empty);
    }
    let text = args[1..].join("\n");
    Ok(Expression::Text(extract_label(&text, label).unwrap_or_default()))
}

/// Splits a line at its first `:` into `(label, rest)` if the part before
/// the colon looks like a label (non-empty, no internal whitespace).
fn split_label_line(line: &str) -> Option<(&str, &str)> {
    let idx = line.find(':')?;
    let (label, rest) = line.split_at(idx);
    let label = label.trim();
    if label.is_empty() || label.contains(char::is_whitespace) {
        return None;
    }
    Some((label, rest[1..].trim_start()))
}

fn extract_label(text: &str, label: &str) -> Option<String> {
    let mut lines = text.lines();
    for line in lines.by_ref() {
        let Some((found, rest)) = split_label_line(line) else {
            continue;
        };
        if !found.eq_ignore_ascii_case(label) {
            continue;
        }
        let mut value = vec![rest.to_owned()];
        for next in lines.by_ref() {
            if split_label_line(next).is_some() {
                break;
            }
            value.push(next.to_owned());
        }
        return Some(value.join("\n").trim().to_owned());
    }
    None
}

/// Inference-parameter settings carried over onto a freshly built provider
/// when it exposes [`crate::provider::Configurable`], keyed the same as
/// `KNOWN_SETTINGS` minus `MODEL` (which goes through `set_model` instead).
const INFERENCE_PARAMS: &[&str] = &["TEMPERATURE", "NUM_CTX", "TOP_K", "TOP_P", "MAX_TOKENS"];

/// `▶SYSTEM PARAM◆` reads `PARAM`; `▶SYSTEM PARAM value◆` sets it.
/// `PROVIDER` additionally rebuilds the live provider from a registered
/// factory, carrying the current inference params over onto it when it
/// implements `Configurable`. Unknown keys, providers, or a factory build
/// failure are reported as sentinel strings rather than errors.
pub(super) fn system(e: &Evaluator, raw: &str, depth: usize) -> Result<Expression, EvalError> {
    let args = e.parse_args(raw, depth)?;
    let Some(key) = args.first() else {
        return Ok(Expression::Text("UNKNOWN_SETTING".into()));
    };
    if !KNOWN_SETTINGS.contains(&key.as_str()) {
        return Ok(Expression::Text("UNKNOWN_SETTING".into()));
    }
    let Some(value) = args.get(1) else {
        return Ok(Expression::Text(e.settings().get(key).unwrap_or_default()));
    };
    if key == "PROVIDER" {
        let Some(factory) = e.provider_factory(value) else {
            return Ok(Expression::Text("UNKNOWN_PROVIDER".into()));
        };
        let provider = match factory.build() {
            Ok(provider) => provider,
            Err(_) => return Ok(Expression::Text("INVALID".into())),
        };
        if let Some(configurable) = provider.as_configurable() {
            if let Some(model) = e.settings().get("MODEL").filter(|m| !m.is_empty()) {
                configurable.set_model(&model);
            }
            for param in INFERENCE_PARAMS {
                if let Some(v) = e.settings().get(*param) {
                    configurable.set_param(param, &v);
                }
            }
        }
        e.set_provider(Arc::from(provider));
    }
    e.settings().set(key.as_str(), value.clone());
    Ok(Expression::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::config::EvaluatorConfig;
    use crate::error::EvaluationError;
    use crate::provider::{Configurable, LlmProvider, ProviderFactory};

    #[derive(Debug)]
    struct Echo;

    impl LlmProvider for Echo {
        fn prompt(&self, system: &str, user: &str) -> Result<String, EvaluationError> {
            Ok(format!("{system}/{user}"))
        }
    }

    #[derive(Debug)]
    struct EchoFactory;

    impl ProviderFactory for EchoFactory {
        fn name(&self) -> &str {
            "echo"
        }

        fn build(&self) -> Result<Box<dyn LlmProvider>, EvaluationError> {
            Ok(Box::new(Echo))
        }
    }

    /// A provider whose model/params can be read back, to verify `SYSTEM
    /// PROVIDER` carries the live settings over onto it.
    #[derive(Debug, Default)]
    struct Tunable {
        model: Mutex<String>,
        params: Mutex<std::collections::HashMap<String, String>>,
    }

    impl LlmProvider for Tunable {
        fn prompt(&self, _system: &str, _user: &str) -> Result<String, EvaluationError> {
            Ok(String::new())
        }

        fn as_configurable(&self) -> Option<&dyn Configurable> {
            Some(self)
        }
    }

    impl Configurable for Tunable {
        fn get_param(&self, key: &str) -> Option<String> {
            self.params.lock().expect("params lock poisoned").get(key).cloned()
        }

        fn set_param(&self, key: &str, value: &str) {
            self.params.lock().expect("params lock poisoned").insert(key.to_owned(), value.to_owned());
        }

        fn get_model(&self) -> String {
            self.model.lock().expect("model lock poisoned").clone()
        }

        fn set_model(&self, model: &str) {
            *self.model.lock().expect("model lock poisoned") = model.to_owned();
        }

        fn provider_name(&self) -> &str {
            "tunable"
        }
    }

    #[derive(Debug)]
    struct TunableFactory;

    impl ProviderFactory for TunableFactory {
        fn name(&self) -> &str {
            "tunable"
        }

        fn build(&self) -> Result<Box<dyn LlmProvider>, EvaluationError> {
            Ok(Box::new(Tunable::default()))
        }
    }

    #[test]
    fn get_and_set_known_setting() {
        let e = Evaluator::new(EvaluatorConfig::default());
        assert_eq!(e.eval("\u{25B6}SYSTEM TEMPERATURE\u{25C6}").unwrap().as_text(), "0.7");
        e.eval("\u{25B6}SYSTEM TEMPERATURE\n0.2\u{25C6}").unwrap();
        assert_eq!(e.eval("\u{25B6}SYSTEM TEMPERATURE\u{25C6}").unwrap().as_text(), "0.2");
    }

    #[test]
    fn unknown_setting_is_a_sentinel_not_an_error() {
        let e = Evaluator::new(EvaluatorConfig::default());
        assert_eq!(e.eval("\u{25B6}SYSTEM NOT_A_SETTING\u{25C6}").unwrap().as_text(), "UNKNOWN_SETTING");
    }

    #[test]
    fn provider_switch_rebuilds_from_registered_factory() {
        let e = Evaluator::new(EvaluatorConfig::default());
        e.register_provider_factory(Arc::new(EchoFactory));
        e.eval("\u{25B6}SYSTEM PROVIDER\necho\u{25C6}").unwrap();
        assert_eq!(e.eval("\u{25B6}PROMPT sys\nusr\u{25C6}").unwrap().as_text(), "sys/usr");
    }

    #[test]
    fn unregistered_provider_is_a_sentinel() {
        let e = Evaluator::new(EvaluatorConfig::default());
        assert_eq!(
            e.eval("\u{25B6}SYSTEM PROVIDER\nghost\u{25C6}").unwrap().as_text(),
            "UNKNOWN_PROVIDER"
        );
    }

    #[test]
    fn prompt_without_a_provider_is_empty() {
        let e = Evaluator::new(EvaluatorConfig::default());
        assert_eq!(e.eval("\u{25B6}PROMPT sys\nusr\u{25C6}").unwrap(), Expression::Empty);
    }

    #[test]
    fn provider_switch_carries_inference_params_onto_a_configurable_provider() {
        let e = Evaluator::new(EvaluatorConfig::default());
        e.register_provider_factory(Arc::new(TunableFactory));
        e.eval("\u{25B6}SYSTEM MODEL\nllama3\u{25C6}").unwrap();
        e.eval("\u{25B6}SYSTEM TEMPERATURE\n0.3\u{25C6}").unwrap();
        e.eval("\u{25B6}SYSTEM PROVIDER\ntunable\u{25C6}").unwrap();

        let provider = e.provider().expect("provider set after switch");
        let configurable = provider.as_configurable().expect("tunable provider is configurable");
        assert_eq!(configurable.get_model(), "llama3");
        assert_eq!(configurable.get_param("TEMPERATURE").as_deref(), Some("0.3"));
        assert_eq!(configurable.get_param("NUM_CTX").as_deref(), Some("4096"));
    }

    #[test]
    fn extract_reads_a_single_line_label() {
        let e = Evaluator::new(EvaluatorConfig::default());
        let result = e.eval("\u{25B6}EXTRACT NAME\nNAME: Ada\nAGE: 30\u{25C6}").unwrap();
        assert_eq!(result.as_text(), "Ada");
    }

    #[test]
    fn extract_is_case_insensitive_on_the_label() {
        let e = Evaluator::new(EvaluatorConfig::default());
        let result = e.eval("\u{25B6}EXTRACT name\nName: Ada\u{25C6}").unwrap();
        assert_eq!(result.as_text(), "Ada");
    }

    #[test]
    fn extract_captures_a_multi_line_value_until_the_next_label() {
        let e = Evaluator::new(EvaluatorConfig::default());
        let result = e
            .eval("\u{25B6}EXTRACT BIO\nBIO: Engineer\nworking on compilers\nAGE: 30\u{25C6}")
            .unwrap();
        assert_eq!(result.as_text(), "Engineer\nworking on compilers");
    }

    #[test]
    fn extract_missing_label_is_empty() {
        let e = Evaluator::new(EvaluatorConfig::default());
        let result = e.eval("\u{25B6}EXTRACT MISSING\nNAME: Ada\u{25C6}").unwrap();
        assert_eq!(result.as_text(), "");
    }
}
