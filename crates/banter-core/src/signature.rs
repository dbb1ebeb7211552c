//! Signatures - typed argument shapes bound to handlers
//!
//! A signature is an ordered list of argument slots plus the handler that
//! consumes them. Slots either name a registered converter or are *inferred*,
//! resolving each token against the registry's registration order at match
//! time. Construction validates everything once, at load time; matching is
//! limited to the cheap arity gate and per-token conversion.
//!
//! Matching never errors: a token a slot cannot convert simply means "this
//! signature does not fit", and the command's remaining signatures get their
//! turn.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::context::Invocation;
use crate::error::{DeclarationError, HandlerError};
use crate::registry::{Converter, TypeRegistry};
use crate::value::CommandValue;

/// A command implementation bound to one signature.
///
/// `arity` is the number of argument slots the handler consumes — a
/// repeatable slot counts once, since the handler receives the collected run
/// as a single argument. Handlers signal failure by returning `Err`; the
/// pipeline additionally contains panics.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Number of argument slots this handler consumes.
    fn arity(&self) -> usize;

    /// Run with a fully-resolved invocation, optionally replying to the
    /// channel.
    async fn run(&self, invocation: Invocation) -> Result<Option<String>, HandlerError>;
}

/// Wrap an async closure as a [`CommandHandler`] with the given arity.
pub fn handler_fn<F, Fut>(arity: usize, run: F) -> Arc<dyn CommandHandler>
where
    F: Fn(Invocation) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<String>, HandlerError>> + Send + 'static,
{
    Arc::new(FnHandler { arity, run })
}

struct FnHandler<F> {
    arity: usize,
    run: F,
}

#[async_trait]
impl<F, Fut> CommandHandler for FnHandler<F>
where
    F: Fn(Invocation) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<String>, HandlerError>> + Send + 'static,
{
    fn arity(&self) -> usize {
        self.arity
    }

    async fn run(&self, invocation: Invocation) -> Result<Option<String>, HandlerError> {
        (self.run)(invocation).await
    }
}

/// How one argument slot types its token.
#[derive(Debug, Clone)]
enum SlotType {
    /// Convert with a converter resolved at construction time.
    Declared(Converter),
    /// Resolve per token at match time: first registered converter that
    /// accepts it.
    Inferred,
}

/// One typed argument slot.
#[derive(Debug, Clone)]
pub struct ArgSlot {
    ty: SlotType,
    repeatable: bool,
}

impl ArgSlot {
    /// The declared type name, or `None` for an inferred slot.
    pub fn type_name(&self) -> Option<&str> {
        match &self.ty {
            SlotType::Declared(converter) => Some(converter.name()),
            SlotType::Inferred => None,
        }
    }

    /// Whether this slot consumes all remaining tokens.
    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    fn convert(&self, registry: &TypeRegistry, token: &str) -> Option<CommandValue> {
        match &self.ty {
            SlotType::Declared(converter) => converter.convert(token),
            SlotType::Inferred => registry.infer(token).map(|(_, value)| value),
        }
    }

    fn shape_eq(&self, other: &Self) -> bool {
        self.repeatable == other.repeatable && self.type_name() == other.type_name()
    }

    fn render(&self) -> String {
        let name = self.type_name().unwrap_or("ANY");
        if self.repeatable {
            format!("<{name}...>")
        } else {
            format!("<{name}>")
        }
    }
}

/// Declarative shape of one signature, as supplied by the module loader:
/// an ordered list of argument type names and the handler they feed.
///
/// A trailing `...` marks a repeatable slot (`"STRING..."`). An empty type
/// list means "infer from the handler's arity": every slot resolves its token
/// against the registry at match time.
#[derive(Clone)]
pub struct SignatureDecl {
    arg_types: Vec<String>,
    handler: Arc<dyn CommandHandler>,
}

impl SignatureDecl {
    /// Declare a signature from type names and a handler.
    pub fn new(arg_types: &[&str], handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            arg_types: arg_types.iter().map(|name| (*name).to_string()).collect(),
            handler,
        }
    }

    /// The declared type names, repeatable markers included.
    pub fn arg_types(&self) -> &[String] {
        &self.arg_types
    }
}

impl fmt::Debug for SignatureDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureDecl")
            .field("arg_types", &self.arg_types)
            .field("handler_arity", &self.handler.arity())
            .finish()
    }
}

/// One concrete argument shape a command accepts, bound to its handler.
#[derive(Clone)]
pub struct Signature {
    slots: Vec<ArgSlot>,
    handler: Arc<dyn CommandHandler>,
}

impl Signature {
    /// Validate a declaration against the registry and build the signature.
    pub(crate) fn build(
        command: &str,
        decl: SignatureDecl,
        registry: &TypeRegistry,
    ) -> Result<Self, DeclarationError> {
        let SignatureDecl { arg_types, handler } = decl;

        if arg_types.is_empty() {
            let slots = vec![
                ArgSlot {
                    ty: SlotType::Inferred,
                    repeatable: false,
                };
                handler.arity()
            ];
            return Ok(Self { slots, handler });
        }

        if arg_types.len() != handler.arity() {
            return Err(DeclarationError::invalid_signature(
                command,
                format!(
                    "declared {} argument types but the handler consumes {}",
                    arg_types.len(),
                    handler.arity()
                ),
            ));
        }

        let mut slots = Vec::with_capacity(arg_types.len());
        for (index, declared) in arg_types.iter().enumerate() {
            let (name, repeatable) = match declared.strip_suffix("...") {
                Some(name) => (name, true),
                None => (declared.as_str(), false),
            };
            if name.is_empty() {
                return Err(DeclarationError::invalid_signature(
                    command,
                    "argument type name is empty",
                ));
            }
            if repeatable && index + 1 != arg_types.len() {
                return Err(DeclarationError::invalid_signature(
                    command,
                    "only the last argument slot may be repeatable",
                ));
            }
            let converter = registry
                .lookup(name)
                .ok_or_else(|| DeclarationError::unknown_type(name))?;
            slots.push(ArgSlot {
                ty: SlotType::Declared(converter),
                repeatable,
            });
        }

        Ok(Self { slots, handler })
    }

    /// Number of argument slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// The argument slots, in order.
    pub fn slots(&self) -> &[ArgSlot] {
        &self.slots
    }

    /// Whether the last slot consumes all remaining tokens.
    pub fn has_repeatable(&self) -> bool {
        self.slots.last().is_some_and(ArgSlot::is_repeatable)
    }

    /// Rendered shape, e.g. `<USER> <STRING...>`. Inferred slots render as
    /// `<ANY>`; a zero-slot signature renders as `()`.
    pub fn shape(&self) -> String {
        if self.slots.is_empty() {
            return "()".to_string();
        }
        self.slots
            .iter()
            .map(ArgSlot::render)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(crate) fn handler(&self) -> &Arc<dyn CommandHandler> {
        &self.handler
    }

    pub(crate) fn same_shape(&self, other: &Self) -> bool {
        self.slots.len() == other.slots.len()
            && self
                .slots
                .iter()
                .zip(&other.slots)
                .all(|(a, b)| a.shape_eq(b))
    }

    /// Try to consume `tokens`, producing the converted argument list.
    ///
    /// `None` means this signature does not fit — wrong arity or a token its
    /// converters reject. Never an error.
    pub(crate) fn try_map(&self, registry: &TypeRegistry, tokens: &[String]) -> Option<MappedArgs> {
        let (fixed, repeatable) = match self.slots.split_last() {
            Some((last, rest)) if last.is_repeatable() => (rest, Some(last)),
            _ => (self.slots.as_slice(), None),
        };

        if repeatable.is_some() {
            if tokens.len() < fixed.len() {
                return None;
            }
        } else if tokens.len() != fixed.len() {
            return None;
        }

        let mut args = Vec::with_capacity(self.slots.len());
        for (slot, token) in fixed.iter().zip(tokens) {
            args.push(MappedArg::One(slot.convert(registry, token)?));
        }

        if let Some(slot) = repeatable {
            let mut run = Vec::with_capacity(tokens.len() - fixed.len());
            for token in &tokens[fixed.len()..] {
                run.push(slot.convert(registry, token)?);
            }
            args.push(MappedArg::Many(run));
        }

        Some(MappedArgs { args })
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("shape", &self.shape())
            .finish_non_exhaustive()
    }
}

/// One converted argument: a single value, or the collected run of a
/// repeatable slot.
#[derive(Debug, Clone, PartialEq)]
pub enum MappedArg {
    /// Value of a non-repeatable slot.
    One(CommandValue),
    /// Ordered values of the repeatable slot, one per consumed token.
    Many(Vec<CommandValue>),
}

impl MappedArg {
    /// Borrow the single value, if this is a non-repeatable argument.
    pub fn as_value(&self) -> Option<&CommandValue> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(_) => None,
        }
    }

    /// Borrow the collected run, if this is a repeatable argument.
    pub fn as_values(&self) -> Option<&[CommandValue]> {
        match self {
            Self::One(_) => None,
            Self::Many(values) => Some(values),
        }
    }
}

/// The converted argument list of a matched signature, one entry per slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedArgs {
    args: Vec<MappedArg>,
}

impl MappedArgs {
    /// Number of arguments (one per slot).
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// True for a zero-slot signature.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// The argument at `index`.
    pub fn get(&self, index: usize) -> Option<&MappedArg> {
        self.args.get(index)
    }

    /// The single value at `index`, if that slot is non-repeatable.
    pub fn value(&self, index: usize) -> Option<&CommandValue> {
        self.args.get(index).and_then(MappedArg::as_value)
    }

    /// The collected run at `index`, if that slot is repeatable.
    pub fn values(&self, index: usize) -> Option<&[CommandValue]> {
        self.args.get(index).and_then(MappedArg::as_values)
    }

    /// Arguments in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &MappedArg> {
        self.args.iter()
    }
}
