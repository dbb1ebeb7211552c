//! Command descriptors - identity, options, and ordered signatures
//!
//! A [`CommandDescriptor`] is built once during the load phase from a
//! [`CommandBuilder`] and immutable afterwards. It owns the command's alias
//! set, its option allow-list, and its signatures in declaration order.
//!
//! Resolution is first-match-wins over that order: callers declare more
//! specific signatures before catch-alls, because a signature that can
//! consume every token sequence (for example a lone repeatable `STRING...`)
//! shadows everything declared after it.

use tracing::trace;

use crate::error::DeclarationError;
use crate::options::OptionSpec;
use crate::registry::TypeRegistry;
use crate::signature::{MappedArgs, Signature, SignatureDecl};

/// Declarative description of one command, accumulated during the load phase.
#[derive(Debug)]
pub struct CommandBuilder {
    aliases: Vec<String>,
    description: Option<String>,
    long_description: Option<String>,
    options: Vec<OptionSpec>,
    signatures: Vec<SignatureDecl>,
}

impl CommandBuilder {
    /// Start a command whose canonical name is `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            aliases: vec![name.into()],
            description: None,
            long_description: None,
            options: Vec::new(),
            signatures: Vec::new(),
        }
    }

    /// The canonical name this builder will declare.
    pub fn name(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or_default()
    }

    /// Add an alternative invocation name.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Set the one-line description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the extended help text.
    pub fn with_long_description(mut self, long_description: impl Into<String>) -> Self {
        self.long_description = Some(long_description.into());
        self
    }

    /// Allow an option for this command.
    pub fn with_option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Append a signature. Declaration order is resolution order.
    pub fn with_signature(mut self, decl: SignatureDecl) -> Self {
        self.signatures.push(decl);
        self
    }

    /// Validate the declaration against `registry` and build the descriptor.
    pub fn build(self, registry: &TypeRegistry) -> Result<CommandDescriptor, DeclarationError> {
        let Self {
            aliases,
            description,
            long_description,
            options,
            signatures,
        } = self;

        let name = aliases
            .first()
            .cloned()
            .unwrap_or_default();
        if name.is_empty() {
            return Err(DeclarationError::invalid_command(
                name,
                "command name is empty",
            ));
        }
        for (index, alias) in aliases.iter().enumerate() {
            if alias.is_empty() {
                return Err(DeclarationError::invalid_command(&name, "alias is empty"));
            }
            if aliases[..index].contains(alias) {
                return Err(DeclarationError::invalid_command(
                    &name,
                    format!("alias `{alias}` is declared twice"),
                ));
            }
        }

        // Option names must be unique ignoring ASCII case, or parsing under
        // the default case-insensitive config would be ambiguous.
        for (index, option) in options.iter().enumerate() {
            let clash = options[..index]
                .iter()
                .any(|other| other.name().eq_ignore_ascii_case(option.name()));
            if clash {
                return Err(DeclarationError::invalid_command(
                    &name,
                    format!("option `{}` is declared twice", option.name()),
                ));
            }
        }

        if signatures.is_empty() {
            return Err(DeclarationError::invalid_command(
                &name,
                "command declares no signatures",
            ));
        }

        let mut built: Vec<Signature> = Vec::with_capacity(signatures.len());
        for decl in signatures {
            let signature = Signature::build(&name, decl, registry)?;
            if let Some(existing) = built.iter().find(|other| other.same_shape(&signature)) {
                return Err(DeclarationError::duplicate_signature(
                    &name,
                    existing.shape(),
                ));
            }
            built.push(signature);
        }

        Ok(CommandDescriptor {
            aliases,
            description,
            long_description,
            options,
            signatures: built,
        })
    }
}

/// One command: identity, allowed options, and its signatures in declaration
/// order.
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    aliases: Vec<String>,
    description: Option<String>,
    long_description: Option<String>,
    options: Vec<OptionSpec>,
    signatures: Vec<Signature>,
}

impl CommandDescriptor {
    /// Canonical name (the first declared alias).
    pub fn name(&self) -> &str {
        &self.aliases[0]
    }

    /// All invocation names, canonical name first.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// One-line description, if declared.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Extended help text, if declared.
    pub fn long_description(&self) -> Option<&str> {
        self.long_description.as_deref()
    }

    /// The option allow-list.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Signatures in declaration order.
    pub fn signatures(&self) -> &[Signature] {
        &self.signatures
    }

    /// Select the first signature, in declaration order, that consumes
    /// `tokens`, returning it with the converted arguments.
    ///
    /// `None` means no signature fit; per-token conversion rejections are
    /// absorbed into that answer.
    pub fn resolve_signature<'a>(
        &'a self,
        registry: &TypeRegistry,
        tokens: &[String],
    ) -> Option<(&'a Signature, MappedArgs)> {
        for signature in &self.signatures {
            if let Some(args) = signature.try_map(registry, tokens) {
                trace!(
                    command = self.name(),
                    shape = %signature.shape(),
                    "signature matched"
                );
                return Some((signature, args));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Invocation;
    use crate::error::HandlerError;
    use crate::signature::CommandHandler;
    use crate::value::CommandValue;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct NoopHandler {
        arity: usize,
    }

    #[async_trait]
    impl CommandHandler for NoopHandler {
        fn arity(&self) -> usize {
            self.arity
        }

        async fn run(&self, _invocation: Invocation) -> Result<Option<String>, HandlerError> {
            Ok(None)
        }
    }

    fn noop(arity: usize) -> Arc<dyn CommandHandler> {
        Arc::new(NoopHandler { arity })
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|token| (*token).to_string()).collect()
    }

    #[test]
    fn builder_produces_descriptor_with_declared_identity() {
        let registry = TypeRegistry::with_builtins();
        let descriptor = CommandBuilder::new("ban")
            .with_alias("b")
            .with_description("ban a user")
            .with_long_description("removes a user from the channel")
            .with_option(OptionSpec::flag("FORCE"))
            .with_signature(SignatureDecl::new(&["USER"], noop(1)))
            .build(&registry)
            .expect("valid command");

        assert_eq!(descriptor.name(), "ban");
        assert_eq!(descriptor.aliases(), &["ban".to_string(), "b".to_string()]);
        assert_eq!(descriptor.description(), Some("ban a user"));
        assert_eq!(descriptor.options().len(), 1);
        assert_eq!(descriptor.signatures().len(), 1);
    }

    #[test]
    fn command_without_signatures_is_rejected() {
        let registry = TypeRegistry::with_builtins();
        let err = CommandBuilder::new("ban")
            .build(&registry)
            .expect_err("no signatures");
        assert_matches!(
            err,
            DeclarationError::InvalidCommand { reason, .. } if reason.contains("no signatures")
        );
    }

    #[test]
    fn duplicate_alias_is_rejected() {
        let registry = TypeRegistry::with_builtins();
        let err = CommandBuilder::new("ban")
            .with_alias("ban")
            .with_signature(SignatureDecl::new(&["USER"], noop(1)))
            .build(&registry)
            .expect_err("duplicate alias");
        assert_matches!(
            err,
            DeclarationError::InvalidCommand { reason, .. } if reason.contains("`ban`")
        );
    }

    #[test]
    fn option_names_clash_ignoring_case() {
        let registry = TypeRegistry::with_builtins();
        let err = CommandBuilder::new("ban")
            .with_option(OptionSpec::flag("FORCE"))
            .with_option(OptionSpec::valued("force"))
            .with_signature(SignatureDecl::new(&["USER"], noop(1)))
            .build(&registry)
            .expect_err("option clash");
        assert_matches!(
            err,
            DeclarationError::InvalidCommand { reason, .. } if reason.contains("`force`")
        );
    }

    #[test]
    fn structurally_equal_signatures_are_rejected() {
        let registry = TypeRegistry::with_builtins();
        let err = CommandBuilder::new("ban")
            .with_signature(SignatureDecl::new(&["USER", "STRING"], noop(2)))
            .with_signature(SignatureDecl::new(&["USER", "STRING"], noop(2)))
            .build(&registry)
            .expect_err("duplicate shape");
        assert_matches!(
            err,
            DeclarationError::DuplicateSignature { shape, .. } if shape == "<USER> <STRING>"
        );
    }

    #[test]
    fn unknown_type_in_any_signature_fails_the_whole_command() {
        let registry = TypeRegistry::with_builtins();
        let err = CommandBuilder::new("ban")
            .with_signature(SignatureDecl::new(&["USER"], noop(1)))
            .with_signature(SignatureDecl::new(&["GIZMO"], noop(1)))
            .build(&registry)
            .expect_err("unknown type");
        assert_matches!(err, DeclarationError::UnknownType { name } if name == "GIZMO");
    }

    #[test]
    fn resolution_tries_signatures_in_declaration_order() {
        let registry = TypeRegistry::with_builtins();
        let descriptor = CommandBuilder::new("set")
            .with_signature(SignatureDecl::new(&["INTEGER"], noop(1)))
            .with_signature(SignatureDecl::new(&["STRING"], noop(1)))
            .build(&registry)
            .expect("two overloads");

        let (signature, args) = descriptor
            .resolve_signature(&registry, &tokens(&["42"]))
            .expect("integer overload");
        assert_eq!(signature.shape(), "<INTEGER>");
        assert_eq!(args.value(0).and_then(CommandValue::as_integer), Some(42));

        let (signature, _) = descriptor
            .resolve_signature(&registry, &tokens(&["forty"]))
            .expect("string overload");
        assert_eq!(signature.shape(), "<STRING>");
    }

    #[test]
    fn catch_all_declared_first_shadows_later_signatures() {
        let registry = TypeRegistry::with_builtins();
        let descriptor = CommandBuilder::new("set")
            .with_signature(SignatureDecl::new(&["STRING"], noop(1)))
            .with_signature(SignatureDecl::new(&["INTEGER"], noop(1)))
            .build(&registry)
            .expect("shadowing order");

        let (signature, _) = descriptor
            .resolve_signature(&registry, &tokens(&["42"]))
            .expect("string wins");
        assert_eq!(signature.shape(), "<STRING>");
    }

    #[test]
    fn no_fitting_signature_resolves_to_none() {
        let registry = TypeRegistry::with_builtins();
        let descriptor = CommandBuilder::new("ban")
            .with_signature(SignatureDecl::new(&["USER"], noop(1)))
            .build(&registry)
            .expect("one overload");
        assert!(descriptor
            .resolve_signature(&registry, &tokens(&["not-a-user", "extra"]))
            .is_none());
    }
}
