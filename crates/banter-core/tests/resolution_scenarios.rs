//! End-to-end resolution scenarios over the public API
//!
//! Each scenario wires the registry, descriptors, and pipeline the way an
//! embedding bot would: declare commands during a load phase, then resolve
//! raw tails as messages arrive.

use std::sync::Arc;

use assert_matches::assert_matches;
use banter_core::prelude::*;

fn context() -> InvocationContext {
    InvocationContext::new("mod", "ops")
}

#[tokio::test]
async fn moderation_flow_with_overloads_and_options() {
    let registry = Arc::new(TypeRegistry::with_builtins());
    let pipeline = CommandPipeline::new(Arc::clone(&registry));

    let ban = CommandBuilder::new("ban")
        .with_alias("b")
        .with_description("ban a user")
        .with_option(OptionSpec::flag("FORCE"))
        .with_option(OptionSpec::valued("REASON"))
        .with_signature(SignatureDecl::new(
            &["USER", "DURATION"],
            handler_fn(2, |invocation: Invocation| async move {
                let user = invocation
                    .args
                    .value(0)
                    .and_then(CommandValue::as_user)
                    .cloned();
                let until = invocation.args.value(1).and_then(CommandValue::as_duration);
                Ok(user.zip(until).map(|(user, until)| {
                    format!("{user} banned for {}s", until.as_secs())
                }))
            }),
        ))
        .with_signature(SignatureDecl::new(
            &["USER"],
            handler_fn(1, |invocation: Invocation| async move {
                let user = invocation
                    .args
                    .value(0)
                    .and_then(CommandValue::as_user)
                    .cloned();
                let reason = invocation
                    .options
                    .value("REASON")
                    .unwrap_or("no reason")
                    .to_string();
                let force = invocation.options.contains("FORCE");
                Ok(user.map(|user| format!("{user} banned ({reason}, force: {force})")))
            }),
        ))
        .build(&registry)
        .expect("valid command");

    let outcome = pipeline
        .resolve(&ban, &context(), "@spammer 10m")
        .await
        .expect("timed ban");
    assert_eq!(outcome.shape, "<USER> <DURATION>");
    assert_eq!(outcome.reply.as_deref(), Some("@spammer banned for 600s"));

    let outcome = pipeline
        .resolve(&ban, &context(), "-force -reason \"ban evasion\" @spammer")
        .await
        .expect("permanent ban");
    assert_eq!(outcome.shape, "<USER>");
    assert_eq!(
        outcome.reply.as_deref(),
        Some("@spammer banned (ban evasion, force: true)")
    );

    // Two positional tokens where no signature takes USER STRING.
    let err = pipeline
        .resolve(&ban, &context(), "@spammer spamming")
        .await
        .expect_err("no fitting overload");
    assert_matches!(err, ResolutionError::NoSignatureMatched { command, .. } if command == "ban");
}

#[tokio::test]
async fn catalog_drives_dispatch_by_alias() {
    let registry = Arc::new(TypeRegistry::with_builtins());
    let pipeline = CommandPipeline::new(Arc::clone(&registry));
    let mut catalog = CommandCatalog::new();

    catalog.install(
        &registry,
        CommandBuilder::new("ping").with_alias("p").with_signature(SignatureDecl::new(
            &[],
            handler_fn(0, |_| async { Ok(Some("pong".to_string())) }),
        )),
    );
    catalog.install(
        &registry,
        CommandBuilder::new("echo").with_signature(SignatureDecl::new(
            &["STRING..."],
            handler_fn(1, |invocation: Invocation| async move {
                Ok(Some(invocation.tokens.join(" ")))
            }),
        )),
    );
    assert_eq!(catalog.len(), 2);
    assert!(catalog.rejected().is_empty());

    let ping = catalog.find("p").expect("alias installed");
    let outcome = pipeline
        .resolve(ping, &context(), "")
        .await
        .expect("zero-arg ping");
    assert_eq!(outcome.command, "ping");
    assert_eq!(outcome.reply.as_deref(), Some("pong"));

    let echo = catalog.find("echo").expect("canonical name installed");
    let outcome = pipeline
        .resolve(echo, &context(), "all systems nominal")
        .await
        .expect("repeatable echo");
    assert_eq!(outcome.reply.as_deref(), Some("all systems nominal"));
}

#[tokio::test]
async fn load_phase_recovers_from_bad_declarations() {
    let registry = Arc::new(TypeRegistry::with_builtins());
    let mut catalog = CommandCatalog::new();

    catalog.install(
        &registry,
        CommandBuilder::new("good").with_signature(SignatureDecl::new(
            &[],
            handler_fn(0, |_| async { Ok(None) }),
        )),
    );
    catalog.install(
        &registry,
        CommandBuilder::new("broken").with_signature(SignatureDecl::new(
            &["GIZMO"],
            handler_fn(1, |_| async { Ok(None) }),
        )),
    );
    catalog.install(
        &registry,
        CommandBuilder::new("also-good").with_alias("good").with_signature(SignatureDecl::new(
            &[],
            handler_fn(0, |_| async { Ok(None) }),
        )),
    );

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.rejected().len(), 2);
    assert_eq!(catalog.rejected()[0].command, "broken");
    assert_matches!(
        catalog.rejected()[0].error,
        DeclarationError::UnknownType { ref name } if name == "GIZMO"
    );
    assert_eq!(catalog.rejected()[1].command, "also-good");
    assert_matches!(
        catalog.rejected()[1].error,
        DeclarationError::DuplicateCommand { ref name } if name == "good"
    );
}

#[tokio::test]
async fn plugin_converter_flows_dynamic_values() {
    #[derive(Debug, PartialEq)]
    struct Emoji(String);

    let registry = Arc::new(TypeRegistry::with_builtins());
    registry
        .register(Converter::new(
            "EMOJI",
            ValueKind::Custom("EMOJI"),
            |token| {
                let name = token.strip_prefix(':')?.strip_suffix(':')?;
                if name.is_empty() {
                    return None;
                }
                Some(CommandValue::Dynamic(DynamicValue::new(
                    "EMOJI",
                    Emoji(name.to_string()),
                )))
            },
        ))
        .expect("fresh name");

    let pipeline = CommandPipeline::new(Arc::clone(&registry));
    let react = CommandBuilder::new("react")
        .with_signature(SignatureDecl::new(
            &["EMOJI"],
            handler_fn(1, |invocation: Invocation| async move {
                let emoji = invocation
                    .args
                    .value(0)
                    .and_then(|value| value.downcast_dynamic::<Emoji>());
                Ok(emoji.map(|emoji| format!("reacted with {}", emoji.0)))
            }),
        ))
        .build(&registry)
        .expect("valid command");

    let outcome = pipeline
        .resolve(&react, &context(), ":tada:")
        .await
        .expect("emoji token");
    assert_eq!(outcome.shape, "<EMOJI>");
    assert_eq!(outcome.reply.as_deref(), Some("reacted with tada"));

    let err = pipeline
        .resolve(&react, &context(), "tada")
        .await
        .expect_err("plain word is not an emoji");
    assert_matches!(err, ResolutionError::NoSignatureMatched { .. });
}

#[test]
fn builtin_names_are_protected_but_reinstall_is_a_noop() {
    let registry = TypeRegistry::with_builtins();
    install_builtins(&registry).expect("reinstall is a no-op");

    let err = registry
        .register(Converter::new("STRING", ValueKind::Text, |token| {
            Some(CommandValue::Text(token.to_uppercase()))
        }))
        .expect_err("stock name is occupied");
    assert_matches!(err, DeclarationError::DuplicateConverter { name } if name == "STRING");
}

#[tokio::test]
async fn inferred_signature_resolves_each_token_by_registration_order() {
    let registry = Arc::new(TypeRegistry::with_builtins());
    let pipeline = CommandPipeline::new(Arc::clone(&registry));

    let inspect = CommandBuilder::new("inspect")
        .with_signature(SignatureDecl::new(
            &[],
            handler_fn(2, |invocation: Invocation| async move {
                let kinds: Vec<String> = invocation
                    .args
                    .iter()
                    .filter_map(MappedArg::as_value)
                    .map(|value| value.kind().to_string())
                    .collect();
                Ok(Some(kinds.join(" ")))
            }),
        ))
        .build(&registry)
        .expect("inferred command");

    let outcome = pipeline
        .resolve(&inspect, &context(), "42 @bob")
        .await
        .expect("two inferable tokens");
    assert_eq!(outcome.shape, "<ANY> <ANY>");
    assert_eq!(outcome.reply.as_deref(), Some("integer user"));
}

#[tokio::test]
async fn builtins_cover_the_common_chat_shapes() {
    let registry = Arc::new(TypeRegistry::with_builtins());
    let pipeline = CommandPipeline::new(Arc::clone(&registry));

    let schedule = CommandBuilder::new("schedule")
        .with_signature(SignatureDecl::new(
            &["CHANNEL", "DURATION", "BOOLEAN"],
            handler_fn(3, |invocation: Invocation| async move {
                let channel = invocation
                    .args
                    .value(0)
                    .and_then(CommandValue::as_channel)
                    .cloned();
                let delay = invocation.args.value(1).and_then(CommandValue::as_duration);
                let repeat = invocation
                    .args
                    .value(2)
                    .and_then(CommandValue::as_switch)
                    .unwrap_or_default();
                Ok(channel.zip(delay).map(|(channel, delay)| {
                    format!("{channel} in {}s (repeat: {repeat})", delay.as_secs())
                }))
            }),
        ))
        .build(&registry)
        .expect("valid command");

    let outcome = pipeline
        .resolve(&schedule, &context(), "#ops 5s yes")
        .await
        .expect("all builtins convert");
    assert_eq!(outcome.reply.as_deref(), Some("#ops in 5s (repeat: true)"));
}
