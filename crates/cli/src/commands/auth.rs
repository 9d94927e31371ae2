use faranga_client::{log_event, AuthClient, EventType, RegisterRequest};
use faranga_core::Role;

use crate::messages::{describe_api_error, message, MessageKey};
use crate::{fail, print_json, require_context, OutputFormat};

pub(crate) fn cmd_login(email: &str, password: &str, output: OutputFormat, quiet: bool) {
    let ctx = require_context(output);
    // Funnel analytics; never blocks the sign-in itself.
    log_event(&ctx.gateway, EventType::LoginClicked, None);
    match AuthClient::new(&ctx.gateway).login(email, password) {
        Ok(session) => {
            if !ctx.session.save(&session) {
                log::warn!("credential could not be persisted; it lasts only this invocation");
            }
            match output {
                OutputFormat::Text => {
                    if !quiet {
                        println!(
                            "Signed in as {} ({})",
                            session.user.email, session.user.role
                        );
                    }
                }
                OutputFormat::Json => print_json(&session.user),
            }
        }
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}

pub(crate) fn cmd_logout(output: OutputFormat, quiet: bool) {
    let ctx = require_context(output);
    ctx.session.clear();
    if !quiet {
        match output {
            OutputFormat::Text => println!("Signed out."),
            OutputFormat::Json => print_json(&serde_json::json!({ "signed_out": true })),
        }
    }
}

pub(crate) fn cmd_whoami(output: OutputFormat, _quiet: bool) {
    let ctx = require_context(output);
    match ctx.session.user() {
        Some(user) => match output {
            OutputFormat::Text => println!("{} ({}) - {}", user.email, user.role, user.name),
            OutputFormat::Json => print_json(&user),
        },
        None => fail(message(MessageKey::NotLoggedIn, ctx.language()), output),
    }
}

pub(crate) fn cmd_register(
    email: &str,
    password: &str,
    role: &str,
    name: &str,
    output: OutputFormat,
    quiet: bool,
) {
    let ctx = require_context(output);
    let role: Role = match role.parse() {
        Ok(Role::Admin) => fail("admin accounts are provisioned on the backend", output),
        Ok(role) => role,
        Err(e) => fail(&e.to_string(), output),
    };
    let request = RegisterRequest {
        email: email.to_string(),
        password: password.to_string(),
        role,
        name: name.to_string(),
    };
    log_event(&ctx.gateway, EventType::RegisterClicked, Some(role));
    match AuthClient::new(&ctx.gateway).register(&request) {
        Ok(session) => {
            if !ctx.session.save(&session) {
                log::warn!("credential could not be persisted; it lasts only this invocation");
            }
            match output {
                OutputFormat::Text => {
                    if !quiet {
                        println!(
                            "Registered {} as {}",
                            session.user.email, session.user.role
                        );
                    }
                }
                OutputFormat::Json => print_json(&session.user),
            }
        }
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}

pub(crate) fn cmd_forgot_password(email: &str, output: OutputFormat, quiet: bool) {
    let ctx = require_context(output);
    match AuthClient::new(&ctx.gateway).forgot_password(email) {
        Ok(response) => {
            if !quiet {
                match output {
                    OutputFormat::Text => println!("{}", response.message),
                    OutputFormat::Json => print_json(&response),
                }
            }
        }
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}

pub(crate) fn cmd_reset_password(
    token: &str,
    new_password: &str,
    output: OutputFormat,
    quiet: bool,
) {
    let ctx = require_context(output);
    match AuthClient::new(&ctx.gateway).reset_password(token, new_password) {
        Ok(response) => {
            if !quiet {
                match output {
                    OutputFormat::Text => println!("{}", response.message),
                    OutputFormat::Json => print_json(&response),
                }
            }
        }
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}
