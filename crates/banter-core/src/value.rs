//! Typed values produced by converters
//!
//! A converter turns one raw token into exactly one [`CommandValue`]. The
//! common chat-bot kinds are first-class variants with typed accessors;
//! anything else travels as a [`DynamicValue`] carrying an arbitrary
//! `Send + Sync` payload with its own kind tag, so plugin converters are not
//! limited to the stock set.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Tag describing the shape of value a converter produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Free text, one token.
    Text,
    /// Signed integer.
    Integer,
    /// Finite floating-point number.
    Decimal,
    /// Boolean switch.
    Switch,
    /// Length of time.
    Duration,
    /// Reference to a chat user.
    User,
    /// Reference to a chat channel.
    Channel,
    /// Plugin-defined kind, identified by its tag.
    Custom(&'static str),
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Integer => write!(f, "integer"),
            Self::Decimal => write!(f, "decimal"),
            Self::Switch => write!(f, "switch"),
            Self::Duration => write!(f, "duration"),
            Self::User => write!(f, "user"),
            Self::Channel => write!(f, "channel"),
            Self::Custom(tag) => write!(f, "{tag}"),
        }
    }
}

/// Opaque reference to a chat user, as named in a token.
///
/// The engine never resolves these against the platform; they are identity
/// material for the handler and the dispatch collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserRef(String);

impl UserRef {
    /// Wrap a bare user name (no mention sigil).
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The bare user name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Opaque reference to a chat channel, as named in a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelRef(String);

impl ChannelRef {
    /// Wrap a bare channel name (no `#` sigil).
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The bare channel name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Payload produced by a plugin converter.
///
/// Equality is payload identity: two dynamic values are equal only when they
/// share the same allocation.
#[derive(Clone)]
pub struct DynamicValue {
    kind: &'static str,
    payload: Arc<dyn Any + Send + Sync>,
}

impl DynamicValue {
    /// Wrap a payload under a plugin kind tag.
    pub fn new<T: Any + Send + Sync>(kind: &'static str, payload: T) -> Self {
        Self {
            kind,
            payload: Arc::new(payload),
        }
    }

    /// The plugin kind tag.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Borrow the payload as a concrete type, if it is one.
    pub fn downcast_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }
}

impl fmt::Debug for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicValue")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl PartialEq for DynamicValue {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && Arc::ptr_eq(&self.payload, &other.payload)
    }
}

/// One strongly-typed argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandValue {
    /// Free text.
    Text(String),
    /// Signed integer.
    Integer(i64),
    /// Finite floating-point number.
    Decimal(f64),
    /// Boolean switch.
    Switch(bool),
    /// Length of time.
    Duration(Duration),
    /// Chat user reference.
    User(UserRef),
    /// Chat channel reference.
    Channel(ChannelRef),
    /// Plugin-defined payload.
    Dynamic(DynamicValue),
}

impl CommandValue {
    /// The kind tag for this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Integer(_) => ValueKind::Integer,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::Switch(_) => ValueKind::Switch,
            Self::Duration(_) => ValueKind::Duration,
            Self::User(_) => ValueKind::User,
            Self::Channel(_) => ValueKind::Channel,
            Self::Dynamic(value) => ValueKind::Custom(value.kind()),
        }
    }

    /// Borrow as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Read as an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Read as a decimal.
    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            Self::Decimal(value) => Some(*value),
            _ => None,
        }
    }

    /// Read as a switch.
    pub fn as_switch(&self) -> Option<bool> {
        match self {
            Self::Switch(value) => Some(*value),
            _ => None,
        }
    }

    /// Read as a duration.
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Duration(value) => Some(*value),
            _ => None,
        }
    }

    /// Borrow as a user reference.
    pub fn as_user(&self) -> Option<&UserRef> {
        match self {
            Self::User(user) => Some(user),
            _ => None,
        }
    }

    /// Borrow as a channel reference.
    pub fn as_channel(&self) -> Option<&ChannelRef> {
        match self {
            Self::Channel(channel) => Some(channel),
            _ => None,
        }
    }

    /// Borrow a dynamic payload as a concrete type.
    pub fn downcast_dynamic<T: Any + Send + Sync>(&self) -> Option<&T> {
        match self {
            Self::Dynamic(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }
}
