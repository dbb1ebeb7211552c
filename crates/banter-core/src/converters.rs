//! Built-in converter set
//!
//! The stock types every command module can rely on. Registration order is
//! deliberate: specific kinds come first so that [`TypeRegistry::infer`]
//! prefers them, and `STRING` — which accepts any token — comes last as the
//! catch-all. The set is built once per process, so installing it into the
//! same registry twice is a no-op rather than a duplicate-name rejection.

use std::sync::OnceLock;
use std::time::Duration;

use tracing::warn;

use crate::error::DeclarationError;
use crate::registry::{Converter, TypeRegistry};
use crate::value::{ChannelRef, CommandValue, UserRef, ValueKind};

/// Symbolic name of the integer converter.
pub const INTEGER: &str = "INTEGER";
/// Symbolic name of the decimal converter.
pub const DECIMAL: &str = "DECIMAL";
/// Symbolic name of the boolean converter.
pub const BOOLEAN: &str = "BOOLEAN";
/// Symbolic name of the duration converter.
pub const DURATION: &str = "DURATION";
/// Symbolic name of the user-mention converter.
pub const USER: &str = "USER";
/// Symbolic name of the channel converter.
pub const CHANNEL: &str = "CHANNEL";
/// Symbolic name of the catch-all text converter.
pub const STRING: &str = "STRING";

static BUILTINS: OnceLock<Vec<Converter>> = OnceLock::new();

/// Register the built-in converters into `registry`.
///
/// Every stock converter is attempted, so one claimed name never blocks the
/// rest of the set: a stock name a module already took for a converter of its
/// own stays bound to that converter, and the first such collision is returned
/// once the pass is complete. Repeated installs of the stock set are no-ops.
pub fn install_builtins(registry: &TypeRegistry) -> Result<(), DeclarationError> {
    let mut first_collision = None;
    for converter in builtins() {
        if let Err(error) = registry.register(converter) {
            warn!(%error, "stock converter name already claimed");
            if first_collision.is_none() {
                first_collision = Some(error);
            }
        }
    }
    match first_collision {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// The stock converters, in their registration order.
pub(crate) fn builtins() -> Vec<Converter> {
    BUILTINS
        .get_or_init(|| {
            vec![
                Converter::new(INTEGER, ValueKind::Integer, |token| {
                    token.parse::<i64>().ok().map(CommandValue::Integer)
                }),
                Converter::new(DECIMAL, ValueKind::Decimal, |token| {
                    token
                        .parse::<f64>()
                        .ok()
                        .filter(|value| value.is_finite())
                        .map(CommandValue::Decimal)
                }),
                Converter::new(BOOLEAN, ValueKind::Switch, |token| {
                    parse_switch(token).map(CommandValue::Switch)
                }),
                Converter::new(DURATION, ValueKind::Duration, |token| {
                    parse_duration(token).map(CommandValue::Duration)
                }),
                Converter::new(USER, ValueKind::User, |token| {
                    sigil_name(token, '@').map(|name| CommandValue::User(UserRef::new(name)))
                }),
                Converter::new(CHANNEL, ValueKind::Channel, |token| {
                    sigil_name(token, '#').map(|name| CommandValue::Channel(ChannelRef::new(name)))
                }),
                Converter::new(STRING, ValueKind::Text, |token| {
                    Some(CommandValue::Text(token.to_string()))
                }),
            ]
        })
        .clone()
}

fn parse_switch(token: &str) -> Option<bool> {
    match token.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => Some(true),
        "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse `<digits><unit>` where unit is one of `ms`, `s`, `m`, `h`, `d`.
fn parse_duration(token: &str) -> Option<Duration> {
    let unit_start = token.find(|c: char| !c.is_ascii_digit())?;
    let (digits, unit) = token.split_at(unit_start);
    if digits.is_empty() {
        return None;
    }
    let amount: u64 = digits.parse().ok()?;
    let millis = match unit {
        "ms" => Some(amount),
        "s" => amount.checked_mul(1_000),
        "m" => amount.checked_mul(60 * 1_000),
        "h" => amount.checked_mul(60 * 60 * 1_000),
        "d" => amount.checked_mul(24 * 60 * 60 * 1_000),
        _ => None,
    }?;
    Some(Duration::from_millis(millis))
}

fn sigil_name(token: &str, sigil: char) -> Option<&str> {
    let name = token.strip_prefix(sigil)?;
    if name.is_empty() {
        return None;
    }
    Some(name)
}
