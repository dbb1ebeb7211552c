//! Error taxonomy for declaration and resolution failures
//!
//! Two separate enums keep the load phase and the per-message path apart:
//! [`DeclarationError`] covers everything that can reject a converter or
//! command while modules are loading, and [`ResolutionError`] covers the three
//! ways a single invocation can fail. A converter rejecting one token is not
//! an error at all — it is absorbed into `NoSignatureMatched` so that sibling
//! signatures still get their turn.

/// Boxed cause raised by a command handler at run time.
///
/// Handlers signal failure by returning `Err`; panics are contained by the
/// pipeline and stringified into the same shape.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Load-time declaration failure.
///
/// Fatal to the one declaration that produced it, never to the process: the
/// catalog records the rejection and keeps loading the rest.
#[derive(Debug, thiserror::Error)]
pub enum DeclarationError {
    /// A converter name is already bound to a different converter.
    #[error("converter `{name}` is already registered with a different definition")]
    DuplicateConverter {
        /// Symbolic converter name that collided
        name: String,
    },

    /// A declared argument type name is unknown to the registry.
    #[error("argument type `{name}` is not registered")]
    UnknownType {
        /// The unresolved type name
        name: String,
    },

    /// A signature declaration is malformed.
    #[error("invalid signature for command `{command}`: {reason}")]
    InvalidSignature {
        /// Command the signature was declared for
        command: String,
        /// What made the declaration invalid
        reason: String,
    },

    /// Two signatures on the same command share the same slot shape.
    #[error("command `{command}` already has a signature with shape {shape}")]
    DuplicateSignature {
        /// Command the signature was declared for
        command: String,
        /// Rendered shape of the colliding signature
        shape: String,
    },

    /// A command declaration is malformed (aliases, options, descriptions).
    #[error("invalid command `{command}`: {reason}")]
    InvalidCommand {
        /// Command being declared
        command: String,
        /// What made the declaration invalid
        reason: String,
    },

    /// A command name or alias is already taken by an installed command.
    #[error("command name `{name}` is already installed")]
    DuplicateCommand {
        /// The colliding name or alias
        name: String,
    },
}

impl DeclarationError {
    /// Create a duplicate converter error.
    pub fn duplicate_converter(name: impl Into<String>) -> Self {
        Self::DuplicateConverter { name: name.into() }
    }

    /// Create an unknown type error.
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    /// Create an invalid signature error.
    pub fn invalid_signature(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSignature {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Create a duplicate signature error.
    pub fn duplicate_signature(command: impl Into<String>, shape: impl Into<String>) -> Self {
        Self::DuplicateSignature {
            command: command.into(),
            shape: shape.into(),
        }
    }

    /// Create an invalid command error.
    pub fn invalid_command(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCommand {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Create a duplicate command error.
    pub fn duplicate_command(name: impl Into<String>) -> Self {
        Self::DuplicateCommand { name: name.into() }
    }
}

/// Per-invocation resolution failure.
///
/// Recoverable by the caller, which owns the user-facing messaging. The
/// variants keep "could not be resolved" strictly apart from "resolved, ran,
/// and failed".
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// The raw tail referenced an option outside the command's allow-list.
    ///
    /// Raised before any argument mapping; the invocation is aborted whole,
    /// never as a partial option/positional split.
    #[error("unknown option `{name}` for command `{command}`")]
    UnknownOption {
        /// Command being invoked
        command: String,
        /// The unrecognized option name as written (prefix stripped)
        name: String,
    },

    /// No registered signature could consume the positional tokens.
    ///
    /// Covers both arity and per-token conversion mismatches; the attempted
    /// token list is kept for diagnostics.
    #[error("no signature of `{command}` accepts the given arguments")]
    NoSignatureMatched {
        /// Command being invoked
        command: String,
        /// The positional tokens that matched nothing
        tokens: Vec<String>,
    },

    /// The matched handler failed at run time.
    ///
    /// The command *was* found and matched; the original cause is preserved.
    #[error("command `{command}` failed while running")]
    Execution {
        /// Command that ran
        command: String,
        /// The handler's failure, or a stringified panic payload
        #[source]
        source: HandlerError,
    },
}

impl ResolutionError {
    /// Create an unknown option error.
    pub fn unknown_option(command: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownOption {
            command: command.into(),
            name: name.into(),
        }
    }

    /// Create a no-signature-matched error.
    pub fn no_signature_matched(command: impl Into<String>, tokens: Vec<String>) -> Self {
        Self::NoSignatureMatched {
            command: command.into(),
            tokens,
        }
    }

    /// Create an execution error from a handler failure.
    pub fn execution(command: impl Into<String>, source: HandlerError) -> Self {
        Self::Execution {
            command: command.into(),
            source,
        }
    }

    /// True if the invocation never reached a handler.
    pub fn is_resolution_failure(&self) -> bool {
        !matches!(self, Self::Execution { .. })
    }
}
