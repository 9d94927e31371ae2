//! Scoring previews. `score all` issues the three model calls
//! concurrently and reports each result independently, mirroring the
//! dashboard's three cards.

use faranga_client::{ApiError, HttpScoring, ScoringProvider};
use faranga_core::{ApplicantFeatures, Language};

use crate::messages::describe_api_error;
use crate::{fail, print_json, require_context, OutputFormat};

#[derive(Debug, Clone, Copy)]
pub(crate) enum Model {
    Eligibility,
    Risk,
    Amount,
}

pub(crate) fn cmd_score_one(
    model: Model,
    features: ApplicantFeatures,
    output: OutputFormat,
    quiet: bool,
) {
    let ctx = require_context(output);
    let language = ctx.language();
    let provider = HttpScoring::new(ctx.gateway.clone());
    let runtime = runtime(output);

    let result: Result<serde_json::Value, ApiError> = runtime.block_on(async {
        match model {
            Model::Eligibility => provider
                .eligibility(&features, language)
                .await
                .and_then(|outcome| to_json(&outcome)),
            Model::Risk => provider
                .risk(&features, language)
                .await
                .and_then(|outcome| to_json(&outcome)),
            Model::Amount => provider
                .recommend_amount(&features, language)
                .await
                .and_then(|outcome| to_json(&outcome)),
        }
    });

    match result {
        Ok(value) => match output {
            OutputFormat::Text => {
                if !quiet {
                    print_model_text(model, &value);
                }
            }
            OutputFormat::Json => print_json(&value),
        },
        Err(e) => fail(&describe_api_error(&e, language), output),
    }
}

pub(crate) fn cmd_score_all(features: ApplicantFeatures, output: OutputFormat, quiet: bool) {
    let ctx = require_context(output);
    let language = ctx.language();
    let provider = HttpScoring::new(ctx.gateway.clone());
    let runtime = runtime(output);

    // Three independent in-flight calls; results land in any order and
    // one failure never blocks the others.
    let (eligibility, risk, amount) = runtime.block_on(async {
        tokio::join!(
            provider.eligibility(&features, language),
            provider.risk(&features, language),
            provider.recommend_amount(&features, language),
        )
    });

    let eligibility = eligibility.and_then(|o| to_json(&o));
    let risk = risk.and_then(|o| to_json(&o));
    let amount = amount.and_then(|o| to_json(&o));

    let all_failed = eligibility.is_err() && risk.is_err() && amount.is_err();

    match output {
        OutputFormat::Text => {
            if !quiet {
                report_text(Model::Eligibility, &eligibility, language);
                report_text(Model::Risk, &risk, language);
                report_text(Model::Amount, &amount, language);
            }
        }
        OutputFormat::Json => {
            print_json(&serde_json::json!({
                "eligibility": json_or_error(eligibility, language),
                "risk": json_or_error(risk, language),
                "amount": json_or_error(amount, language),
            }));
        }
    }

    if all_failed {
        std::process::exit(1);
    }
}

fn runtime(output: OutputFormat) -> tokio::runtime::Runtime {
    match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => fail(&format!("could not start async runtime: {e}"), output),
    }
}

fn to_json<T: serde::Serialize>(outcome: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(outcome).map_err(|e| ApiError::Decode(e.to_string()))
}

fn json_or_error(
    result: Result<serde_json::Value, ApiError>,
    language: Language,
) -> serde_json::Value {
    match result {
        Ok(value) => value,
        Err(e) => serde_json::json!({ "error": describe_api_error(&e, language) }),
    }
}

fn report_text(model: Model, result: &Result<serde_json::Value, ApiError>, language: Language) {
    match result {
        Ok(value) => print_model_text(model, value),
        Err(e) => println!("{}: {}", label(model), describe_api_error(e, language)),
    }
}

fn label(model: Model) -> &'static str {
    match model {
        Model::Eligibility => "eligibility",
        Model::Risk => "risk",
        Model::Amount => "recommended amount",
    }
}

fn print_model_text(model: Model, value: &serde_json::Value) {
    match model {
        Model::Eligibility => {
            let approved = value["approved"].as_bool().unwrap_or(false);
            println!(
                "eligibility: {}",
                if approved { "approved" } else { "not approved" }
            );
            if let Some(reason) = value["reason"].as_str() {
                println!("  {reason}");
            }
        }
        Model::Risk => {
            if let Some(score) = value["score"].as_f64() {
                println!("risk score: {score:.2}");
            }
            if let Some(reason) = value["reason"].as_str() {
                println!("  {reason}");
            }
        }
        Model::Amount => {
            if let Some(amount) = value["amount"].as_f64() {
                println!("recommended amount: {amount:.0} RWF");
            }
            if let Some(reason) = value["reason"].as_str() {
                println!("  {reason}");
            }
        }
    }
}
