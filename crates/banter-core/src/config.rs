//! Tokenizer and option-matching configuration.

use serde::{Deserialize, Serialize};

/// Configuration governing tokenization and option-name matching.
///
/// One value is fixed per pipeline; invocations never vary it. The defaults
/// reproduce the common chat-bot surface: `-option` flags, shell-like quoting,
/// and case-insensitive option names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Character that introduces an option token, e.g. `-` in `-force`.
    pub option_prefix: char,
    /// Honor double quotes and backslash escapes when splitting the tail.
    ///
    /// When disabled, the tail splits on whitespace only and quote characters
    /// are ordinary token content.
    pub quoting: bool,
    /// Match option names against the allow-list without regard to case.
    ///
    /// Declared option names are symbolic (conventionally upper-case); with
    /// this off, invocations must reproduce the declared casing exactly.
    pub case_insensitive_options: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            option_prefix: '-',
            quoting: true,
            case_insensitive_options: true,
        }
    }
}
