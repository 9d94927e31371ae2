use faranga_client::AdminClient;
use faranga_core::Role;

use crate::messages::{describe_api_error, message, MessageKey};
use crate::{fail, print_json, require_context, OutputFormat};

fn require_token(ctx: &crate::context::AppContext, output: OutputFormat) -> String {
    match ctx.session.token() {
        Some(token) => token,
        None => fail(message(MessageKey::NotLoggedIn, ctx.language()), output),
    }
}

pub(crate) fn cmd_activity(limit: u32, output: OutputFormat, _quiet: bool) {
    let ctx = require_context(output);
    let token = require_token(&ctx, output);
    match AdminClient::new(&ctx.gateway, &token).activity(limit) {
        Ok(response) => match output {
            OutputFormat::Text => {
                for event in &response.events {
                    println!(
                        "{}  {}  {}",
                        event.created_at, event.event_type, event.role
                    );
                }
                println!("{} event(s)", response.count);
            }
            OutputFormat::Json => print_json(&response),
        },
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}

pub(crate) fn cmd_users(role: Option<&str>, limit: u32, output: OutputFormat, _quiet: bool) {
    let ctx = require_context(output);
    let token = require_token(&ctx, output);
    let role = match role {
        Some(raw) => match raw.parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => fail(&e.to_string(), output),
        },
        None => None,
    };
    match AdminClient::new(&ctx.gateway, &token).users(role, limit) {
        Ok(response) => match output {
            OutputFormat::Text => {
                for user in &response.users {
                    println!("#{}  {}  {}  {}", user.id, user.role, user.email, user.name);
                }
                println!("{} user(s)", response.count);
            }
            OutputFormat::Json => print_json(&response),
        },
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}

pub(crate) fn cmd_console(output: OutputFormat, _quiet: bool) {
    let ctx = require_context(output);
    let url = format!("{}/admin/", ctx.gateway.backend_origin());
    match output {
        OutputFormat::Text => println!("{url}"),
        OutputFormat::Json => print_json(&serde_json::json!({ "console": url })),
    }
}

pub(crate) fn cmd_stats(output: OutputFormat, _quiet: bool) {
    let ctx = require_context(output);
    let token = require_token(&ctx, output);
    match AdminClient::new(&ctx.gateway, &token).stats() {
        Ok(stats) => match output {
            OutputFormat::Text => {
                println!(
                    "users:         {} farmers, {} microfinance",
                    stats.users.farmers, stats.users.microfinance
                );
                println!(
                    "applications:  {} pending / {} approved / {} rejected",
                    stats.applications.pending,
                    stats.applications.approved,
                    stats.applications.rejected
                );
            }
            OutputFormat::Json => print_json(&stats),
        },
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}
