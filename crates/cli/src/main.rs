mod commands;
mod context;
mod messages;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use faranga_core::ApplicantFeatures;
use serde::Serialize;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use crate::context::AppContext;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Faranga loan-platform client.
#[derive(Parser)]
#[command(name = "faranga", version, about = "Faranga loan-platform client")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log debug detail to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session credential
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Remove the stored session credential
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Create a farmer or microfinance account
    Register {
        email: String,
        #[arg(long)]
        password: String,
        /// Account role (farmer or microfinance)
        #[arg(long)]
        role: String,
        #[arg(long, default_value = "")]
        name: String,
    },

    /// Request a password reset email
    ForgotPassword { email: String },

    /// Set a new password using a reset token
    ResetPassword {
        token: String,
        #[arg(long)]
        new_password: String,
    },

    /// Show or update the farmer profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Required documents and uploads
    Documents {
        #[command(subcommand)]
        command: DocumentCommands,
    },

    /// Submit a loan application from a JSON form file
    Apply {
        /// Path to the application form JSON
        form: PathBuf,
    },

    /// List my applications with their status history
    Applications,

    /// Download an application package (ZIP)
    Package {
        application_id: i64,
        /// Write to this file instead of the server-suggested name
        #[arg(long)]
        out: Option<PathBuf>,
        /// Use the MFI endpoint instead of the farmer one
        #[arg(long)]
        mfi: bool,
    },

    /// List my loans
    Loans,

    /// List repayments on my loans
    Repayments,

    /// MFI review tools
    Mfi {
        #[command(subcommand)]
        command: MfiCommands,
    },

    /// Admin queries
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Preview the scoring models
    Score {
        #[command(subcommand)]
        command: ScoreCommands,
    },

    /// Ask the multilingual assistant
    Chat { message: String },

    /// Local farm records (kept on this machine only)
    Farm {
        #[command(subcommand)]
        command: FarmCommands,
    },

    /// Show or set the display language
    Lang {
        #[command(subcommand)]
        command: LangCommands,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show the farmer profile
    Show,
    /// Update profile fields
    Update {
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        cooperative: Option<String>,
    },
}

#[derive(Subcommand)]
enum DocumentCommands {
    /// List the documents required for an application
    Required {
        /// Language for the document labels (en, fr, rw)
        #[arg(long)]
        language: Option<String>,
    },
    /// Upload a document for an application
    Upload {
        application_id: i64,
        document_type: String,
        file: PathBuf,
    },
    /// List documents already attached to an application
    List { application_id: i64 },
}

#[derive(Subcommand)]
enum MfiCommands {
    /// List applications in the review queue
    Applications {
        /// Filter by status (pending, under_review, ..., or all)
        #[arg(long)]
        status: Option<String>,
    },
    /// Approve or reject an application
    Review {
        application_id: i64,
        /// approve or reject
        action: String,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        interest_rate: Option<f64>,
        #[arg(long)]
        duration_months: Option<u32>,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Request a status transition with an optional note
    SetStatus {
        application_id: i64,
        /// under_review, documents_requested, approved, or rejected
        status: String,
        #[arg(long)]
        note: Option<String>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        interest_rate: Option<f64>,
        #[arg(long)]
        duration_months: Option<u32>,
    },
    /// Portfolio and repayment performance
    Portfolio,
}

#[derive(Subcommand)]
enum AdminCommands {
    /// List Get Started funnel events
    Activity {
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    /// List platform accounts
    Users {
        /// Filter by role (farmer, microfinance, admin)
        #[arg(long)]
        role: Option<String>,
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// Dashboard statistics
    Stats,
    /// Print the staff console URL
    Console,
}

#[derive(Subcommand)]
enum ScoreCommands {
    /// Model 1: loan eligibility
    Eligibility {
        #[command(flatten)]
        features: FeatureArgs,
    },
    /// Model 2: default risk score
    Risk {
        #[command(flatten)]
        features: FeatureArgs,
    },
    /// Model 3: recommended loan amount
    Amount {
        #[command(flatten)]
        features: FeatureArgs,
    },
    /// Run all three models concurrently
    All {
        #[command(flatten)]
        features: FeatureArgs,
    },
}

/// Applicant features shared by the scoring commands. Defaults match
/// the dashboard's prefilled form.
#[derive(Args)]
struct FeatureArgs {
    #[arg(long, default_value_t = 35)]
    age: u32,
    #[arg(long, default_value_t = 600_000.0)]
    annual_income: f64,
    #[arg(long, default_value_t = 600)]
    credit_score: u32,
    #[arg(long, default_value_t = 200_000.0)]
    loan_amount: f64,
    #[arg(long, default_value_t = 24)]
    duration_months: u32,
    #[arg(long, default_value_t = 0.35)]
    debt_to_income: f64,
    #[arg(long, default_value = "Self-Employed")]
    employment_status: String,
    #[arg(long, default_value = "High School")]
    education_level: String,
    #[arg(long)]
    marital_status: Option<String>,
    #[arg(long)]
    loan_purpose: Option<String>,
}

impl FeatureArgs {
    fn to_features(&self) -> ApplicantFeatures {
        ApplicantFeatures {
            age: self.age,
            annual_income: self.annual_income,
            credit_score: self.credit_score,
            loan_amount: self.loan_amount,
            loan_duration_months: self.duration_months,
            debt_to_income_ratio: self.debt_to_income,
            employment_status: self.employment_status.clone(),
            education_level: self.education_level.clone(),
            marital_status: self.marital_status.clone(),
            loan_purpose: self.loan_purpose.clone(),
        }
    }
}

#[derive(Subcommand)]
enum FarmCommands {
    /// Record a farm employee
    AddEmployee {
        full_name: String,
        #[arg(long, default_value = "")]
        role: String,
        #[arg(long, default_value = "")]
        start_date: String,
        #[arg(long, default_value = "monthly")]
        pay_frequency: String,
        #[arg(long, default_value = "")]
        pay_amount: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        national_id: String,
        #[arg(long, default_value = "permanent")]
        employee_type: String,
        #[arg(long, default_value = "active")]
        status: String,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Record seed stock
    AddSeed {
        name: String,
        #[arg(long, default_value = "")]
        variety: String,
        #[arg(long, default_value = "")]
        quantity: String,
        #[arg(long, default_value = "kg")]
        unit: String,
        #[arg(long, default_value = "")]
        supplier: String,
        #[arg(long, default_value = "")]
        lot_number: String,
        #[arg(long, default_value = "")]
        purchase_date: String,
        #[arg(long, default_value = "")]
        storage_location: String,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Record a production cycle
    AddProduction {
        crop: String,
        #[arg(long, default_value = "")]
        season: String,
        #[arg(long, default_value = "")]
        area_hectares: String,
        #[arg(long, default_value = "")]
        planting_date: String,
        #[arg(long, default_value = "")]
        harvest_date: String,
        #[arg(long, default_value = "")]
        harvested_quantity: String,
        #[arg(long, default_value = "kg")]
        harvested_unit: String,
        #[arg(long, default_value = "")]
        field_name: String,
        #[arg(long, default_value = "")]
        buyer: String,
        #[arg(long, default_value = "")]
        price_per_unit: String,
        #[arg(long, default_value = "")]
        total_revenue: String,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Record a fertilizer application
    AddFertilizer {
        fertilizer_name: String,
        #[arg(long, default_value = "")]
        crop: String,
        #[arg(long, default_value = "")]
        field_name: String,
        #[arg(long, default_value = "")]
        application_date: String,
        #[arg(long, default_value = "")]
        rate: String,
        #[arg(long, default_value = "")]
        interval_days: String,
        #[arg(long, default_value = "basal")]
        fertilizer_type: String,
        #[arg(long, default_value = "broadcast")]
        method: String,
        #[arg(long, default_value = "")]
        supplier: String,
        #[arg(long, default_value = "")]
        cost: String,
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List records in one section
    List { section: FarmSection },

    /// Export one section as CSV
    Export {
        section: FarmSection,
        /// Output file (default: farm_data.csv)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Farm data sections, matching the dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum FarmSection {
    Employees,
    Fertilizers,
    Seeds,
    Production,
}

#[derive(Subcommand)]
enum LangCommands {
    /// Show the stored display language
    Show,
    /// Set the display language (en, fr, rw)
    Set { code: String },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let output = cli.output;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::cmd_login(&email, &password, output, quiet)
        }
        Commands::Logout => commands::auth::cmd_logout(output, quiet),
        Commands::Whoami => commands::auth::cmd_whoami(output, quiet),
        Commands::Register {
            email,
            password,
            role,
            name,
        } => commands::auth::cmd_register(&email, &password, &role, &name, output, quiet),
        Commands::ForgotPassword { email } => {
            commands::auth::cmd_forgot_password(&email, output, quiet)
        }
        Commands::ResetPassword {
            token,
            new_password,
        } => commands::auth::cmd_reset_password(&token, &new_password, output, quiet),

        Commands::Profile { command } => match command {
            ProfileCommands::Show => commands::farmer::cmd_profile_show(output, quiet),
            ProfileCommands::Update {
                location,
                phone,
                cooperative,
            } => commands::farmer::cmd_profile_update(location, phone, cooperative, output, quiet),
        },

        Commands::Documents { command } => match command {
            DocumentCommands::Required { language } => {
                commands::farmer::cmd_documents_required(language.as_deref(), output, quiet)
            }
            DocumentCommands::Upload {
                application_id,
                document_type,
                file,
            } => commands::farmer::cmd_documents_upload(
                application_id,
                &document_type,
                &file,
                output,
                quiet,
            ),
            DocumentCommands::List { application_id } => {
                commands::farmer::cmd_documents_list(application_id, output, quiet)
            }
        },

        Commands::Apply { form } => commands::farmer::cmd_apply(&form, output, quiet),
        Commands::Applications => commands::farmer::cmd_applications(output, quiet),
        Commands::Package {
            application_id,
            out,
            mfi,
        } => commands::farmer::cmd_package(application_id, out, mfi, output, quiet),
        Commands::Loans => commands::farmer::cmd_loans(output, quiet),
        Commands::Repayments => commands::farmer::cmd_repayments(output, quiet),

        Commands::Mfi { command } => match command {
            MfiCommands::Applications { status } => {
                commands::mfi::cmd_applications(status.as_deref(), output, quiet)
            }
            MfiCommands::Review {
                application_id,
                action,
                amount,
                interest_rate,
                duration_months,
                reason,
            } => commands::mfi::cmd_review(
                application_id,
                &action,
                amount,
                interest_rate,
                duration_months,
                reason,
                output,
                quiet,
            ),
            MfiCommands::SetStatus {
                application_id,
                status,
                note,
                amount,
                interest_rate,
                duration_months,
            } => commands::mfi::cmd_set_status(
                application_id,
                &status,
                note,
                amount,
                interest_rate,
                duration_months,
                output,
                quiet,
            ),
            MfiCommands::Portfolio => commands::mfi::cmd_portfolio(output, quiet),
        },

        Commands::Admin { command } => match command {
            AdminCommands::Activity { limit } => {
                commands::admin::cmd_activity(limit, output, quiet)
            }
            AdminCommands::Users { role, limit } => {
                commands::admin::cmd_users(role.as_deref(), limit, output, quiet)
            }
            AdminCommands::Stats => commands::admin::cmd_stats(output, quiet),
            AdminCommands::Console => commands::admin::cmd_console(output, quiet),
        },

        Commands::Score { command } => match command {
            ScoreCommands::Eligibility { features } => commands::score::cmd_score_one(
                commands::score::Model::Eligibility,
                features.to_features(),
                output,
                quiet,
            ),
            ScoreCommands::Risk { features } => commands::score::cmd_score_one(
                commands::score::Model::Risk,
                features.to_features(),
                output,
                quiet,
            ),
            ScoreCommands::Amount { features } => commands::score::cmd_score_one(
                commands::score::Model::Amount,
                features.to_features(),
                output,
                quiet,
            ),
            ScoreCommands::All { features } => {
                commands::score::cmd_score_all(features.to_features(), output, quiet)
            }
        },

        Commands::Chat { message } => commands::chat::cmd_chat(&message, output, quiet),

        Commands::Farm { command } => commands::farm::dispatch(command, output, quiet),

        Commands::Lang { command } => match command {
            LangCommands::Show => commands::lang::cmd_show(output, quiet),
            LangCommands::Set { code } => commands::lang::cmd_set(&code, output, quiet),
        },
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

/// Print an error in the selected output format. Errors are always
/// reported, even under `--quiet`.
pub(crate) fn report_error(message: &str, output: OutputFormat) {
    match output {
        OutputFormat::Text => eprintln!("error: {message}"),
        OutputFormat::Json => eprintln!("{}", serde_json::json!({ "error": message })),
    }
}

/// Report an error and exit non-zero.
pub(crate) fn fail(message: &str, output: OutputFormat) -> ! {
    report_error(message, output);
    process::exit(1);
}

/// Initialize the app context or exit with a usable message.
pub(crate) fn require_context(output: OutputFormat) -> AppContext {
    match AppContext::init() {
        Ok(ctx) => ctx,
        Err(message) => fail(&message, output),
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => report_error(&format!("could not serialize output: {e}"), OutputFormat::Text),
    }
}
