use faranga_client::{MfiClient, ReviewAction, ReviewTerms, StatusUpdateRequest};
use faranga_core::ApplicationStatus;

use crate::context::AppContext;
use crate::messages::describe_api_error;
use crate::{fail, print_json, require_context, OutputFormat};

fn mfi<'a>(ctx: &'a AppContext) -> MfiClient<'a> {
    MfiClient::new(&ctx.gateway, &ctx.session)
}

pub(crate) fn cmd_applications(status: Option<&str>, output: OutputFormat, _quiet: bool) {
    let ctx = require_context(output);
    match mfi(&ctx).applications(status) {
        Ok(response) => match output {
            OutputFormat::Text => {
                for app in &response.applications {
                    println!(
                        "#{}  {}  {}  {:.0} RWF / {} months  risk {}",
                        app.id,
                        app.status,
                        app.user_email,
                        app.loan_amount_requested,
                        app.loan_duration_months,
                        app.risk_score
                            .map(|s| format!("{s:.2}"))
                            .unwrap_or_else(|| "-".to_string()),
                    );
                }
                println!("{} application(s)", response.count);
            }
            OutputFormat::Json => print_json(&response),
        },
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_review(
    application_id: i64,
    action: &str,
    amount: Option<f64>,
    interest_rate: Option<f64>,
    duration_months: Option<u32>,
    reason: Option<String>,
    output: OutputFormat,
    quiet: bool,
) {
    let action = match action.trim().to_lowercase().as_str() {
        "approve" => ReviewAction::Approve,
        "reject" => ReviewAction::Reject,
        other => fail(
            &format!("action must be approve or reject, got '{other}'"),
            output,
        ),
    };
    let ctx = require_context(output);
    let terms = ReviewTerms {
        amount,
        interest_rate,
        duration_months,
        rejection_reason: reason,
    };
    match mfi(&ctx).review(application_id, action, &terms) {
        Ok(outcome) => match output {
            OutputFormat::Text => {
                if !quiet {
                    println!("Application {} is now {}.", outcome.id, outcome.status);
                }
            }
            OutputFormat::Json => print_json(&outcome),
        },
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_set_status(
    application_id: i64,
    status: &str,
    note: Option<String>,
    amount: Option<f64>,
    interest_rate: Option<f64>,
    duration_months: Option<u32>,
    output: OutputFormat,
    quiet: bool,
) {
    let status = ApplicationStatus::parse(status.trim());
    let settable = ApplicationStatus::settable();
    if !settable.contains(&status) {
        let allowed: Vec<&str> = settable.iter().map(|s| s.as_str()).collect();
        fail(
            &format!("status must be one of: {}", allowed.join(", ")),
            output,
        );
    }
    let ctx = require_context(output);
    let request = StatusUpdateRequest {
        status,
        note,
        amount,
        interest_rate,
        duration_months,
    };
    match mfi(&ctx).update_status(application_id, &request) {
        Ok(updated) => match output {
            OutputFormat::Text => {
                if !quiet {
                    println!("Application {} is now {}.", updated.id, updated.status);
                    for update in &updated.status_history {
                        println!("    {}  {}  {}", update.created_at, update.status, update.note);
                    }
                }
            }
            OutputFormat::Json => print_json(&updated),
        },
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}

pub(crate) fn cmd_portfolio(output: OutputFormat, _quiet: bool) {
    let ctx = require_context(output);
    match mfi(&ctx).portfolio() {
        Ok(summary) => match output {
            OutputFormat::Text => {
                println!("loans:            {}", summary.total_loans);
                println!("disbursed:        {:.0} RWF", summary.total_amount_disbursed);
                println!(
                    "repayments:       {} paid / {} overdue / {} pending (of {})",
                    summary.repayments.paid,
                    summary.repayments.overdue,
                    summary.repayments.pending,
                    summary.repayments.total
                );
            }
            OutputFormat::Json => print_json(&summary),
        },
        Err(e) => fail(&describe_api_error(&e, ctx.language()), output),
    }
}
