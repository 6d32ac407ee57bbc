mod applicant;
mod company;
mod config;
mod db;
mod error;
mod forms;
mod models;
mod records;
mod recruiter;
mod reports;
mod schema;
mod seed;
mod session;
mod table;
mod tui;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;

use config::AppConfig;
use db::Database;
use forms::{ApplicantForm, RecordForm, RecruiterForm};
use reports::{Report, View};
use schema::Table;
use session::Role;
use table::ResultTable;

/// Widest a text-mode column may grow before its cells are truncated.
const MAX_CELL: usize = 40;

#[derive(Parser)]
#[command(name = "jobbank")]
#[command(about = "Job bank database - companies, recruiters, jobs, applicants and interviews")]
struct Cli {
    /// Database file (overrides the configured path)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true, conflicts_with = "tui")]
    json: bool,

    /// Browse result tables interactively
    #[arg(long, global = true)]
    tui: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the database as a role; non-admin roles initialize it
    Login {
        #[arg(value_enum)]
        role: Role,

        /// Applicant, recruiter or company ID
        #[arg(long)]
        id: Option<i64>,
    },

    /// Create missing tables and seed the empty ones
    Init,

    /// Administrator tools
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Applicant dashboard
    Applicant {
        /// Applicant ID
        #[arg(long)]
        id: i64,

        #[command(subcommand)]
        command: ApplicantCommands,
    },

    /// Recruiter dashboard
    Recruiter {
        /// Recruiter ID
        #[arg(long)]
        id: i64,

        #[command(subcommand)]
        command: RecruiterCommands,
    },

    /// Company dashboard
    Company {
        /// Company ID
        #[arg(long)]
        id: i64,

        #[command(subcommand)]
        command: CompanyCommands,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Create every table (fails if any exists)
    Create,

    /// Insert all sample rows (fails on duplicates)
    Populate,

    /// Drop every table, children first
    Drop,

    /// List the tables with their row counts
    Tables,

    /// Show every row of a table
    Look {
        #[arg(value_enum)]
        table: Table,
    },

    /// Insert a row
    Add {
        #[command(subcommand)]
        record: RecordForm,
    },

    /// Update a row by ID
    Update {
        #[command(subcommand)]
        record: RecordForm,
    },

    /// Delete a row by ID
    Delete {
        #[arg(value_enum)]
        table: Table,

        id: i64,
    },

    /// Run a catalog query (all of them when none is named)
    Query {
        #[arg(value_enum)]
        report: Option<Report>,

        /// Company name for the `connected` query
        #[arg(long)]
        company: Option<String>,
    },

    /// Re-create a view and show its rows (all of them when none is named)
    View {
        #[arg(value_enum)]
        view: Option<View>,
    },
}

#[derive(Subcommand)]
enum ApplicantCommands {
    /// Browse jobs, newest first
    Jobs,

    /// Show one job in full
    Show {
        /// Job ID
        job_id: i64,
    },

    /// Apply for a job
    Apply {
        /// Job ID
        job_id: i64,

        /// Attach this file as a new resume
        #[arg(short, long)]
        resume: Option<PathBuf>,
    },

    /// Upload a resume file
    Upload {
        file: PathBuf,
    },

    /// My applications
    Applications,

    /// My interviews
    Interviews,

    /// Update my profile
    Profile(ApplicantForm),
}

#[derive(Subcommand)]
enum RecruiterCommands {
    /// Recruiters at my company
    Recruiters,

    /// Add a recruiter to my company
    AddRecruiter(RecruiterForm),

    /// Jobs at my company
    Jobs,

    /// Applications to my jobs
    Applications,

    /// Set the status of an application to one of my jobs
    Evaluate {
        /// Application ID
        job_app_id: i64,

        /// New status, e.g. "Under Review" or "Rejected"
        status: String,
    },

    /// Interviews from now on
    Interviews,
}

#[derive(Subcommand)]
enum CompanyCommands {
    /// Job listings with recruiter and application count
    Jobs,

    /// Our recruiters
    Recruiters,

    /// Applicants to our jobs
    Applicants,

    /// Interviews for our jobs
    Interviews,

    /// Applications to our jobs
    Applications,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Text,
    Json,
    Tui,
}

fn init_tracing(verbose: u8, default_level: &str) -> Result<()> {
    let level = match verbose {
        0 => default_level,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("JOBBANK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Print a result set in the selected format.
fn show(output: Output, title: &str, table: &ResultTable) -> Result<()> {
    match output {
        Output::Json => println!("{}", serde_json::to_string_pretty(table)?),
        Output::Tui => tui::run_browse(title, table)?,
        Output::Text => {
            println!("{title}\n");
            if table.is_empty() {
                println!("No rows.");
            } else {
                print!("{}", table.render_text(MAX_CELL));
                println!("\n({} row{})", table.len(), if table.len() == 1 { "" } else { "s" });
            }
        }
    }
    Ok(())
}

/// Print a single outcome: serialized for `--json`, otherwise the message.
fn emit<T: Serialize>(output: Output, value: &T, message: impl FnOnce() -> String) -> Result<()> {
    if output == Output::Json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", message());
    }
    Ok(())
}

fn list(tables: &[Table]) -> String {
    if tables.is_empty() {
        "none".to_string()
    } else {
        tables.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    init_tracing(cli.verbose, &config.general.log)?;

    let output = if cli.json {
        Output::Json
    } else if cli.tui {
        Output::Tui
    } else {
        Output::Text
    };

    let path = cli.db.unwrap_or_else(|| config.database.resolved_path());
    let db = Database::open(&path, &config.database)
        .with_context(|| format!("Login failed: cannot open database at {}", path.display()))?;

    match cli.command {
        Commands::Login { role, id } => {
            let session = session::login(&db, role, id)?;
            emit(output, &session, || {
                let mut message = format!("Logged in as {} ({:?}).", session.display_name, role);
                if let Some(init) = &session.init {
                    message.push_str(&format!(
                        "\nCreated: {}\nSeeded: {}",
                        list(&init.created),
                        list(&init.seeded)
                    ));
                }
                message
            })?;
        }

        Commands::Init => {
            let report = db.initialize()?;
            emit(output, &report, || {
                format!(
                    "Database ready at {}\nCreated: {}\nAlready present: {}\nSeeded: {}",
                    db.path().display(),
                    list(&report.created),
                    list(&report.existing),
                    list(&report.seeded)
                )
            })?;
        }

        Commands::Admin { command } => {
            session::login(&db, Role::Admin, None)?;
            run_admin(&db, output, command)?;
        }

        Commands::Applicant { id, command } => {
            session::login(&db, Role::Applicant, Some(id))?;
            run_applicant(&db, output, id, command)?;
        }

        Commands::Recruiter { id, command } => {
            session::login(&db, Role::Recruiter, Some(id))?;
            run_recruiter(&db, output, id, command)?;
        }

        Commands::Company { id, command } => {
            session::login(&db, Role::Company, Some(id))?;
            run_company(&db, output, id, command)?;
        }
    }

    db.close()?;
    Ok(())
}

fn run_admin(db: &Database, output: Output, command: AdminCommands) -> Result<()> {
    match command {
        AdminCommands::Create => {
            let created = db.create_tables()?;
            emit(output, &created, || format!("Tables created: {}", list(&created)))?;
        }

        AdminCommands::Populate => {
            let statements = db.populate_tables()?;
            emit(output, &json!({ "statements": statements }), || {
                format!("Tables populated ({statements} statements).")
            })?;
        }

        AdminCommands::Drop => {
            let report = db.drop_tables()?;
            emit(output, &report, || {
                format!(
                    "Dropped: {}\nNot present: {}",
                    list(&report.dropped),
                    list(&report.missing)
                )
            })?;
        }

        AdminCommands::Tables => {
            show(output, "Tables", &db.overview()?)?;
        }

        AdminCommands::Look { table } => {
            show(output, table.name(), &db.look(table)?)?;
        }

        AdminCommands::Add { record } => {
            let (table, id) = record.add(db)?;
            emit(output, &json!({ "table": table, "id": id }), || {
                format!("Added {table} #{id}.")
            })?;
        }

        AdminCommands::Update { record } => {
            let (table, id) = record.edit(db)?;
            emit(output, &json!({ "table": table, "id": id }), || {
                format!("Updated {table} #{id}.")
            })?;
        }

        AdminCommands::Delete { table, id } => {
            db.delete(table, id)?;
            emit(output, &json!({ "table": table, "id": id }), || {
                format!("Deleted {table} #{id}.")
            })?;
        }

        AdminCommands::Query { report, company } => {
            let selected = report.map_or(Report::ALL.to_vec(), |r| vec![r]);
            for report in selected {
                let rows = db.run_report(report, company.as_deref())?;
                show(output, report.title(), &rows)?;
            }
        }

        AdminCommands::View { view } => {
            let selected = view.map_or(View::ALL.to_vec(), |v| vec![v]);
            for view in selected {
                let rows = db.show_view(view)?;
                show(output, view.name(), &rows)?;
            }
        }
    }
    Ok(())
}

fn run_applicant(db: &Database, output: Output, id: i64, command: ApplicantCommands) -> Result<()> {
    match command {
        ApplicantCommands::Jobs => {
            show(output, "Jobs", &applicant::browse_jobs(db)?)?;
        }

        ApplicantCommands::Show { job_id } => {
            let details = applicant::job_details(db, job_id)?;
            emit(output, &details, || details.render(80))?;
        }

        ApplicantCommands::Apply { job_id, resume } => {
            let outcome = applicant::apply(db, id, job_id, resume.as_deref())?;
            emit(output, &outcome, || match &outcome {
                applicant::ApplyOutcome::Submitted {
                    job_app_id,
                    resume_id: Some(resume_id),
                } => format!("Application #{job_app_id} submitted with resume #{resume_id}."),
                applicant::ApplyOutcome::Submitted { job_app_id, .. } => {
                    format!("Application #{job_app_id} submitted.")
                }
                applicant::ApplyOutcome::AlreadyApplied { job_app_id } => {
                    format!("You already applied for job #{job_id} (application #{job_app_id}).")
                }
            })?;
        }

        ApplicantCommands::Upload { file } => {
            let resume_id = applicant::upload_resume(db, id, file)?;
            emit(output, &json!({ "resume_id": resume_id }), || {
                format!("Resume #{resume_id} uploaded.")
            })?;
        }

        ApplicantCommands::Applications => {
            show(output, "My Applications", &applicant::my_applications(db, id)?)?;
        }

        ApplicantCommands::Interviews => {
            show(output, "My Interviews", &applicant::my_interviews(db, id)?)?;
        }

        ApplicantCommands::Profile(form) => {
            let updated = applicant::update_profile(db, id, form)?;
            emit(output, &updated, || "Profile updated.".to_string())?;
        }
    }
    Ok(())
}

fn run_recruiter(db: &Database, output: Output, id: i64, command: RecruiterCommands) -> Result<()> {
    match command {
        RecruiterCommands::Recruiters => {
            show(output, "Recruiters", &recruiter::recruiters(db, id)?)?;
        }

        RecruiterCommands::AddRecruiter(form) => {
            let new_id = recruiter::add_recruiter(db, id, form)?;
            emit(output, &json!({ "recruiter_id": new_id }), || {
                format!("Recruiter #{new_id} added.")
            })?;
        }

        RecruiterCommands::Jobs => {
            show(output, "Company Jobs", &recruiter::company_jobs(db, id)?)?;
        }

        RecruiterCommands::Applications => {
            show(output, "Applications", &recruiter::applications(db, id)?)?;
        }

        RecruiterCommands::Evaluate { job_app_id, status } => {
            let application = recruiter::evaluate(db, id, job_app_id, &status)?;
            emit(output, &application, || {
                format!(
                    "Application #{job_app_id} is now '{}'.",
                    application.status.as_deref().unwrap_or_default()
                )
            })?;
        }

        RecruiterCommands::Interviews => {
            show(output, "Upcoming Interviews", &recruiter::upcoming_interviews(db, id)?)?;
        }
    }
    Ok(())
}

fn run_company(db: &Database, output: Output, id: i64, command: CompanyCommands) -> Result<()> {
    let (title, rows) = match command {
        CompanyCommands::Jobs => ("Job Listings", company::jobs(db, id)?),
        CompanyCommands::Recruiters => ("Recruiters", company::recruiters(db, id)?),
        CompanyCommands::Applicants => ("Applicants", company::applicants(db, id)?),
        CompanyCommands::Interviews => ("Interviews", company::interviews(db, id)?),
        CompanyCommands::Applications => ("Applications", company::applications(db, id)?),
    };
    show(output, title, &rows)
}
