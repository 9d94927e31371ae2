use faranga_core::Language;

use crate::{fail, print_json, require_context, OutputFormat};

pub(crate) fn cmd_show(output: OutputFormat, _quiet: bool) {
    let ctx = require_context(output);
    let language = ctx.language();
    match output {
        OutputFormat::Text => println!("{language}"),
        OutputFormat::Json => print_json(&language),
    }
}

pub(crate) fn cmd_set(code: &str, output: OutputFormat, quiet: bool) {
    let ctx = require_context(output);
    let language = Language::parse(code);
    if !ctx.session.set_language(language) {
        fail("could not persist the language selection", output);
    }
    if !quiet {
        match output {
            OutputFormat::Text => println!("Display language set to {language}."),
            OutputFormat::Json => print_json(&language),
        }
    }
}
