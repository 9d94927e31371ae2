use std::path::{Path, PathBuf};

use faranga_client::{FarmerClient, LoanApplicationForm, MfiClient, ProfileUpdate};
use faranga_core::Language;

use crate::context::AppContext;
use crate::messages::describe_api_error;
use crate::{fail, print_json, require_context, OutputFormat};

fn farmer<'a>(ctx: &'a AppContext) -> FarmerClient<'a> {
    FarmerClient::new(&ctx.gateway, &ctx.session)
}

pub(crate) fn cmd_profile_show(output: OutputFormat, _quiet: bool) {
    let ctx = require_context(output);
    match farmer(&ctx).profile() {
        Ok(profile) => match output {
            OutputFormat::Text => {
                println!("location:     {}", profile.location);
                println!("phone:        {}", profile.phone);
                println!("cooperative:  {}", profile.cooperative_name);
            }
            OutputFormat::Json => print_json(&profile),
        },
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}

pub(crate) fn cmd_profile_update(
    location: Option<String>,
    phone: Option<String>,
    cooperative: Option<String>,
    output: OutputFormat,
    quiet: bool,
) {
    if location.is_none() && phone.is_none() && cooperative.is_none() {
        fail("nothing to update: pass --location, --phone, or --cooperative", output);
    }
    let ctx = require_context(output);
    let update = ProfileUpdate {
        location,
        phone,
        cooperative_name: cooperative,
    };
    match farmer(&ctx).update_profile(&update) {
        Ok(profile) => match output {
            OutputFormat::Text => {
                if !quiet {
                    println!("Profile updated.");
                }
            }
            OutputFormat::Json => print_json(&profile),
        },
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}

pub(crate) fn cmd_documents_required(
    language: Option<&str>,
    output: OutputFormat,
    _quiet: bool,
) {
    let ctx = require_context(output);
    let language = language.map(Language::parse).unwrap_or_else(|| ctx.language());
    match farmer(&ctx).required_documents(language) {
        Ok(response) => match output {
            OutputFormat::Text => {
                for doc in &response.documents {
                    let marker = if doc.required { "required" } else { "optional" };
                    let label = doc.label.as_deref().unwrap_or(&doc.document_type);
                    println!("[{marker}] {label} ({})", doc.document_type);
                }
            }
            OutputFormat::Json => print_json(&response),
        },
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}

pub(crate) fn cmd_documents_upload(
    application_id: i64,
    document_type: &str,
    file: &Path,
    output: OutputFormat,
    quiet: bool,
) {
    let ctx = require_context(output);
    let bytes = match std::fs::read(file) {
        Ok(bytes) => bytes,
        Err(e) => fail(&format!("could not read '{}': {e}", file.display()), output),
    };
    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());
    let content_type = content_type_for(&filename);

    match farmer(&ctx).upload_document(application_id, document_type, &filename, content_type, bytes)
    {
        Ok(document) => match output {
            OutputFormat::Text => {
                if !quiet {
                    println!("Uploaded {} for application {application_id}.", document.document_type);
                }
            }
            OutputFormat::Json => print_json(&document),
        },
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}

pub(crate) fn cmd_documents_list(application_id: i64, output: OutputFormat, _quiet: bool) {
    let ctx = require_context(output);
    match farmer(&ctx).application_documents(application_id) {
        Ok(response) => match output {
            OutputFormat::Text => {
                for doc in &response.documents {
                    println!(
                        "{}  {}",
                        doc.document_type,
                        doc.file_name.as_deref().unwrap_or("-")
                    );
                }
            }
            OutputFormat::Json => print_json(&response),
        },
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}

pub(crate) fn cmd_apply(form_path: &Path, output: OutputFormat, quiet: bool) {
    let ctx = require_context(output);
    let form_text = match std::fs::read_to_string(form_path) {
        Ok(text) => text,
        Err(e) => fail(
            &format!("could not read '{}': {e}", form_path.display()),
            output,
        ),
    };
    let form: LoanApplicationForm = match serde_json::from_str(&form_text) {
        Ok(form) => form,
        Err(e) => fail(
            &format!("invalid application form in '{}': {e}", form_path.display()),
            output,
        ),
    };

    match farmer(&ctx).submit_application(&form, ctx.language()) {
        Ok(submitted) => match output {
            OutputFormat::Text => {
                if !quiet {
                    println!("Application {} submitted ({}).", submitted.id, submitted.status);
                    if let Some(score) = submitted.risk_score {
                        println!("risk score:        {score:.2}");
                    }
                    if let Some(amount) = submitted.recommended_amount {
                        println!("recommended:       {amount:.0} RWF");
                    }
                }
            }
            OutputFormat::Json => print_json(&submitted),
        },
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}

pub(crate) fn cmd_applications(output: OutputFormat, _quiet: bool) {
    let ctx = require_context(output);
    match farmer(&ctx).applications() {
        Ok(response) => match output {
            OutputFormat::Text => {
                for app in &response.applications {
                    println!(
                        "#{}  {}  {:.0} RWF / {} months  ({})",
                        app.id,
                        app.status,
                        app.loan_amount_requested,
                        app.loan_duration_months,
                        app.created_at
                    );
                    for update in &app.status_history {
                        let actor = update.updated_by_name.as_deref().unwrap_or("System");
                        println!("    {}  {}  {} {}", update.created_at, update.status, actor, update.note);
                    }
                }
                println!("{} application(s)", response.count);
            }
            OutputFormat::Json => print_json(&response),
        },
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}

pub(crate) fn cmd_package(
    application_id: i64,
    out: Option<PathBuf>,
    via_mfi: bool,
    output: OutputFormat,
    quiet: bool,
) {
    let ctx = require_context(output);
    let result = if via_mfi {
        MfiClient::new(&ctx.gateway, &ctx.session).download_package(application_id)
    } else {
        farmer(&ctx).download_package(application_id)
    };
    match result {
        Ok(download) => {
            let path = out.unwrap_or_else(|| {
                download
                    .filename_hint
                    .as_deref()
                    .map(sanitize_filename)
                    .filter(|name| !name.is_empty())
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(format!("application_{application_id}.zip")))
            });
            if let Err(e) = std::fs::write(&path, &download.bytes) {
                fail(&format!("could not write '{}': {e}", path.display()), output);
            }
            match output {
                OutputFormat::Text => {
                    if !quiet {
                        println!("Saved {} ({} bytes).", path.display(), download.bytes.len());
                    }
                }
                OutputFormat::Json => print_json(&serde_json::json!({
                    "path": path.display().to_string(),
                    "bytes": download.bytes.len(),
                })),
            }
        }
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}

pub(crate) fn cmd_loans(output: OutputFormat, _quiet: bool) {
    let ctx = require_context(output);
    match farmer(&ctx).loans() {
        Ok(response) => match output {
            OutputFormat::Text => {
                for loan in &response.loans {
                    println!(
                        "#{}  {:.0} RWF at {:.1}% / {} months  (monthly {:.0})",
                        loan.id,
                        loan.amount,
                        loan.interest_rate * 100.0,
                        loan.duration_months,
                        loan.monthly_payment
                    );
                }
                println!("{} loan(s)", response.count);
            }
            OutputFormat::Json => print_json(&response),
        },
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}

pub(crate) fn cmd_repayments(output: OutputFormat, _quiet: bool) {
    let ctx = require_context(output);
    match farmer(&ctx).repayments() {
        Ok(response) => match output {
            OutputFormat::Text => {
                for repayment in &response.repayments {
                    println!(
                        "#{}  {:.0} RWF due {}  [{}]",
                        repayment.id, repayment.amount, repayment.due_date, repayment.status
                    );
                }
                println!("{} repayment(s)", response.count);
            }
            OutputFormat::Json => print_json(&response),
        },
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}

/// Keep only filesystem-safe characters from a server-suggested name.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim_matches(['.', '_'])
        .to_string()
}

fn content_type_for(filename: &str) -> &'static str {
    let extension = filename.rsplit('.').next().unwrap_or("");
    match extension.to_ascii_lowercase().as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_path_and_control_characters() {
        assert_eq!(
            sanitize_filename("../../etc/passwd"),
            "etc_passwd"
        );
        assert_eq!(
            sanitize_filename("jean_20260210_application_12.zip"),
            "jean_20260210_application_12.zip"
        );
        assert_eq!(sanitize_filename("...."), "");
    }

    #[test]
    fn content_types_by_extension() {
        assert_eq!(content_type_for("scan.PDF"), "application/pdf");
        assert_eq!(content_type_for("photo.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("unknown.bin"), "application/octet-stream");
    }
}
