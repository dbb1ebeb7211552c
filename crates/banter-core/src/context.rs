//! Invocation context - who invoked, from where, with what
//!
//! [`InvocationContext`] identifies the sender and channel a message came
//! from. [`Invocation`] is the fully-resolved record the pipeline hands to a
//! handler: context plus the matched command, the raw argument tail, parsed
//! options, positional tokens, and the converted argument list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::options::ParsedOptions;
use crate::signature::MappedArgs;

/// Opaque identifier of the sending user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SenderId(String);

impl SenderId {
    /// Wrap a platform-assigned sender identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SenderId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SenderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Opaque identifier of the channel a message arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(String);

impl ChannelId {
    /// Wrap a platform-assigned channel identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ChannelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Where an invocation came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationContext {
    /// The user who sent the message.
    pub sender: SenderId,
    /// The channel the message arrived in.
    pub channel: ChannelId,
}

impl InvocationContext {
    /// Build a context from sender and channel identifiers.
    pub fn new(sender: impl Into<SenderId>, channel: impl Into<ChannelId>) -> Self {
        Self {
            sender: sender.into(),
            channel: channel.into(),
        }
    }
}

/// Everything a handler learns about one resolved command invocation.
///
/// Handlers receive this by value and may take ownership of any part of it.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Sender and channel of the triggering message.
    pub context: InvocationContext,
    /// Canonical name of the matched command (first declared alias).
    pub command: String,
    /// The argument tail exactly as it followed the command word.
    pub raw_tail: String,
    /// Options matched against the command's allow list.
    pub options: ParsedOptions,
    /// Positional tokens, after option extraction.
    pub tokens: Vec<String>,
    /// Converted arguments of the matched signature, one entry per slot.
    pub args: MappedArgs,
    /// Rendered shape of the matched signature, e.g. `<USER> <STRING...>`.
    pub shape: String,
}
