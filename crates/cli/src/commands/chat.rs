use faranga_client::chat;

use crate::messages::describe_api_error;
use crate::{fail, print_json, require_context, OutputFormat};

pub(crate) fn cmd_chat(message: &str, output: OutputFormat, _quiet: bool) {
    let ctx = require_context(output);
    match chat(&ctx.gateway, message, ctx.language()) {
        Ok(reply) => match output {
            OutputFormat::Text => println!("{}", reply.reply),
            OutputFormat::Json => print_json(&reply),
        },
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}
