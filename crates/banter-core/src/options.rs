//! Option parsing and shell-like tokenization
//!
//! `parse` splits a raw command tail into the command's recognized options and
//! the residual positional tokens, in original order. Tokenization is
//! whitespace splitting with two shell-like refinements when quoting is
//! enabled: double quotes group a run (including whitespace) into a single
//! token, and a backslash escapes the next character. A token containing any
//! quote or escape is *literal* — it is never interpreted as an option, so
//! `"-force"` is data while `-force` is an option reference.
//!
//! The parser is pure and total apart from one failure: an option reference
//! whose name is not in the command's allow-list rejects the whole parse.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;
use crate::error::ResolutionError;

/// One declared option in a command's allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    name: String,
    takes_value: bool,
}

impl OptionSpec {
    /// Declare a plain flag, e.g. `FORCE`.
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            takes_value: false,
        }
    }

    /// Declare an option that consumes the following token as its value,
    /// e.g. `NAME` in `-name bob`.
    pub fn valued(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            takes_value: true,
        }
    }

    /// The symbolic option name as declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the option consumes the following token as its value.
    pub fn takes_value(&self) -> bool {
        self.takes_value
    }
}

/// Options parsed from one invocation, keyed by their declared symbolic name,
/// in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    entries: IndexMap<String, Option<String>>,
}

impl ParsedOptions {
    /// Whether the option was supplied.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The option's value, if the option was supplied with one.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(|value| value.as_deref())
    }

    /// Presence and value together: `None` if the option was not supplied,
    /// `Some(None)` if supplied without a value.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.entries.get(name).map(|value| value.as_deref())
    }

    /// Supplied options in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Number of distinct options supplied.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no options were supplied.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, name: String, value: Option<String>) {
        self.entries.insert(name, value);
    }
}

/// Result of splitting a raw tail: recognized options plus positional tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    /// Recognized options, keyed by declared name.
    pub options: ParsedOptions,
    /// Non-option tokens, in original order.
    pub positionals: Vec<String>,
}

/// Split `raw_tail` into options and positional tokens for `command`.
///
/// An option reference outside `allowed` fails the whole parse with
/// [`ResolutionError::UnknownOption`] — never a partial split. An option
/// declared as valued consumes the immediately following token verbatim; at
/// end of input it is recorded without a value. A later occurrence of an
/// option overwrites the earlier value.
pub fn parse(
    command: &str,
    raw_tail: &str,
    allowed: &[OptionSpec],
    config: &ParserConfig,
) -> Result<ParsedInput, ResolutionError> {
    let mut parsed = ParsedInput::default();
    let mut tokens = tokenize(raw_tail, config).into_iter();

    while let Some(token) = tokens.next() {
        let name = match option_name(&token, config) {
            Some(name) => name.to_string(),
            None => {
                parsed.positionals.push(token.text);
                continue;
            }
        };
        let spec = find_spec(allowed, &name, config)
            .ok_or_else(|| ResolutionError::unknown_option(command, name))?;
        let value = if spec.takes_value() {
            tokens.next().map(|token| token.text)
        } else {
            None
        };
        parsed.options.insert(spec.name().to_string(), value);
    }

    Ok(parsed)
}

/// A token split from the raw tail. `literal` marks quoted/escaped content,
/// which is never interpreted as an option.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawToken {
    text: String,
    literal: bool,
}

/// The option name referenced by `token`, if it is an option reference:
/// non-literal, starts with the prefix, and names something after it.
fn option_name<'t>(token: &'t RawToken, config: &ParserConfig) -> Option<&'t str> {
    if token.literal {
        return None;
    }
    let name = token.text.strip_prefix(config.option_prefix)?;
    if name.is_empty() {
        // A bare prefix character is data, not an option reference.
        return None;
    }
    Some(name)
}

fn find_spec<'a>(
    allowed: &'a [OptionSpec],
    name: &str,
    config: &ParserConfig,
) -> Option<&'a OptionSpec> {
    allowed.iter().find(|spec| {
        if config.case_insensitive_options {
            spec.name().eq_ignore_ascii_case(name)
        } else {
            spec.name() == name
        }
    })
}

/// Split the raw tail into tokens.
///
/// With quoting enabled: double quotes group, backslash escapes the next
/// character, an unterminated quote runs to end of input, and a trailing
/// backslash is a literal backslash. With quoting disabled: plain whitespace
/// splitting, quote characters are ordinary content.
fn tokenize(raw: &str, config: &ParserConfig) -> Vec<RawToken> {
    if !config.quoting {
        return raw
            .split_whitespace()
            .map(|text| RawToken {
                text: text.to_string(),
                literal: false,
            })
            .collect();
    }

    let mut tokens = Vec::new();
    let mut chars = raw.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut text = String::new();
        let mut literal = false;
        let mut in_quotes = false;

        while let Some(&c) = chars.peek() {
            if !in_quotes && c.is_whitespace() {
                break;
            }
            chars.next();
            match c {
                '"' => {
                    in_quotes = !in_quotes;
                    literal = true;
                }
                '\\' => {
                    literal = true;
                    match chars.next() {
                        Some(escaped) => text.push(escaped),
                        None => text.push('\\'),
                    }
                }
                _ => text.push(c),
            }
        }

        tokens.push(RawToken { text, literal });
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn allowed() -> Vec<OptionSpec> {
        vec![OptionSpec::flag("FORCE"), OptionSpec::valued("NAME")]
    }

    fn texts(raw: &str, config: &ParserConfig) -> Vec<String> {
        tokenize(raw, config)
            .into_iter()
            .map(|token| token.text)
            .collect()
    }

    #[test]
    fn options_and_positionals_split_in_order() {
        let config = ParserConfig::default();
        let parsed = parse("do", "-force -name bob do it", &allowed(), &config).unwrap();

        assert!(parsed.options.contains("FORCE"));
        assert_eq!(parsed.options.value("FORCE"), None);
        assert_eq!(parsed.options.value("NAME"), Some("bob"));
        assert_eq!(parsed.positionals, vec!["do".to_string(), "it".to_string()]);

        let order: Vec<&str> = parsed.options.iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["FORCE", "NAME"]);
    }

    #[test]
    fn parsing_is_idempotent() {
        let config = ParserConfig::default();
        let first = parse("do", "-force a \"b c\"", &allowed(), &config).unwrap();
        let second = parse("do", "-force a \"b c\"", &allowed(), &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_option_rejects_the_whole_parse() {
        let config = ParserConfig::default();
        let err = parse("do", "a -oops b", &allowed(), &config).unwrap_err();
        assert_matches!(
            err,
            ResolutionError::UnknownOption { command, name }
                if command == "do" && name == "oops"
        );
    }

    #[test]
    fn quoted_runs_stay_single_tokens() {
        let config = ParserConfig::default();
        assert_eq!(
            texts(r#"say "$ hey !." done"#, &config),
            vec!["say".to_string(), "$ hey !.".to_string(), "done".to_string()]
        );
    }

    #[test]
    fn escapes_preserve_characters() {
        let config = ParserConfig::default();
        assert_eq!(
            texts(r"a\ b c\\d trailing\", &config),
            vec!["a b".to_string(), r"c\d".to_string(), r"trailing\".to_string()]
        );
    }

    #[test]
    fn unterminated_quote_runs_to_end_of_input() {
        let config = ParserConfig::default();
        assert_eq!(
            texts(r#"say "a b"#, &config),
            vec!["say".to_string(), "a b".to_string()]
        );
    }

    #[test]
    fn empty_quotes_yield_an_empty_token() {
        let config = ParserConfig::default();
        assert_eq!(texts(r#"say """#, &config), vec!["say".to_string(), String::new()]);
    }

    #[test]
    fn quoted_or_escaped_option_lookalikes_stay_positional() {
        let config = ParserConfig::default();
        let parsed = parse("do", r#""-force" \-name x"#, &allowed(), &config).unwrap();
        assert!(parsed.options.is_empty());
        assert_eq!(
            parsed.positionals,
            vec!["-force".to_string(), "-name".to_string(), "x".to_string()]
        );
    }

    #[test]
    fn bare_prefix_is_positional() {
        let config = ParserConfig::default();
        let parsed = parse("do", "- x", &allowed(), &config).unwrap();
        assert!(parsed.options.is_empty());
        assert_eq!(parsed.positionals, vec!["-".to_string(), "x".to_string()]);
    }

    #[test]
    fn valued_option_consumes_the_next_token_verbatim() {
        let config = ParserConfig::default();
        let parsed = parse("do", "-name -force x", &allowed(), &config).unwrap();
        assert_eq!(parsed.options.value("NAME"), Some("-force"));
        assert!(!parsed.options.contains("FORCE"));
        assert_eq!(parsed.positionals, vec!["x".to_string()]);
    }

    #[test]
    fn valued_option_at_end_of_tail_has_no_value() {
        let config = ParserConfig::default();
        let parsed = parse("do", "x -name", &allowed(), &config).unwrap();
        assert_eq!(parsed.options.get("NAME"), Some(None));
        assert_eq!(parsed.positionals, vec!["x".to_string()]);
    }

    #[test]
    fn quoted_values_keep_their_whitespace() {
        let config = ParserConfig::default();
        let parsed = parse("do", r#"-name "bob the builder""#, &allowed(), &config).unwrap();
        assert_eq!(parsed.options.value("NAME"), Some("bob the builder"));
    }

    #[test]
    fn later_occurrences_overwrite_the_value() {
        let config = ParserConfig::default();
        let parsed = parse("do", "-name a -name b", &allowed(), &config).unwrap();
        assert_eq!(parsed.options.len(), 1);
        assert_eq!(parsed.options.value("NAME"), Some("b"));
    }

    #[test]
    fn case_rule_is_configurable() {
        let insensitive = ParserConfig::default();
        let parsed = parse("do", "-FoRcE", &allowed(), &insensitive).unwrap();
        assert!(parsed.options.contains("FORCE"));

        let exact = ParserConfig {
            case_insensitive_options: false,
            ..ParserConfig::default()
        };
        let err = parse("do", "-force", &allowed(), &exact).unwrap_err();
        assert_matches!(err, ResolutionError::UnknownOption { name, .. } if name == "force");
        let parsed = parse("do", "-FORCE", &allowed(), &exact).unwrap();
        assert!(parsed.options.contains("FORCE"));
    }

    #[test]
    fn alternate_prefix_marker() {
        let config = ParserConfig {
            option_prefix: '!',
            ..ParserConfig::default()
        };
        let parsed = parse("do", "!force -name", &allowed(), &config).unwrap();
        assert!(parsed.options.contains("FORCE"));
        assert_eq!(parsed.positionals, vec!["-name".to_string()]);
    }

    #[test]
    fn disabled_quoting_splits_on_whitespace_only() {
        let config = ParserConfig {
            quoting: false,
            ..ParserConfig::default()
        };
        assert_eq!(
            texts(r#"say "a b" c"#, &config),
            vec!["say".to_string(), "\"a".to_string(), "b\"".to_string(), "c".to_string()]
        );

        // A quote-wrapped option reference no longer starts with the prefix.
        let parsed = parse("do", r#""-force""#, &allowed(), &config).unwrap();
        assert_eq!(parsed.positionals, vec!["\"-force\"".to_string()]);
    }
}
