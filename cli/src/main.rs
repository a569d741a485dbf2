use std::sync::Arc;
use std::time::Duration;

use attendance_client::net::api::{
    AuthApi, HttpApi, ME_ENDPOINT, SESSION_TOKEN_ENDPOINT, Timeouts, TransportError, ApiResponse,
};
use attendance_client::net::types::{
    AttendanceRecord, AttendanceStatus, DailySummary, MarkAttendance, NewStudent, Role, Student, User,
};
use attendance_client::state::auth_form::{AuthForm, SubmitOutcome};
use attendance_client::state::header::{HeaderController, LogoutOutcome};
use attendance_client::state::navigation::Navigator;
use attendance_client::state::toast::{Notifier, Toast};
use attendance_client::util::clock::parse_iso_date;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("server returned HTTP {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("{0}")]
    Rejected(String),
    #[error("invalid date {0:?}; expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "attendance-cli", about = "Attendance API command-line client")]
struct Cli {
    #[arg(long, env = "ATTENDANCE_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "ATTENDANCE_SESSION_TOKEN")]
    session_token: Option<String>,

    #[arg(long, default_value_t = attendance_client::net::api::DEFAULT_REQUEST_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the server health endpoint.
    Ping,
    /// Sign in and print the session token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "ATTENDANCE_PASSWORD")]
        password: String,
    },
    /// Create an account. Does not sign in.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "ATTENDANCE_PASSWORD")]
        password: String,
        /// Defaults to `--password`.
        #[arg(long)]
        confirm_password: Option<String>,
        #[arg(long, default_value = "teacher", value_parser = parse_role)]
        role: Role,
    },
    /// End the current session.
    Logout,
    /// Show the signed-in user.
    Me,
    Students(StudentsCommand),
    Attendance(AttendanceCommand),
}

#[derive(Args, Debug)]
struct StudentsCommand {
    #[command(subcommand)]
    command: StudentsSubcommand,
}

#[derive(Subcommand, Debug)]
enum StudentsSubcommand {
    List {
        #[arg(long)]
        class_name: Option<String>,
    },
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        roll_number: String,
        #[arg(long)]
        class_name: String,
    },
    Remove {
        student_id: Uuid,
    },
}

#[derive(Args, Debug)]
struct AttendanceCommand {
    #[command(subcommand)]
    command: AttendanceSubcommand,
}

#[derive(Subcommand, Debug)]
enum AttendanceSubcommand {
    List {
        #[arg(long)]
        date: Option<String>,
    },
    Mark {
        student_id: Uuid,
        #[arg(value_parser = parse_status)]
        status: AttendanceStatus,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    Summary {
        #[arg(long)]
        date: Option<String>,
    },
}

// =============================================================================
// TERMINAL SEAMS
// =============================================================================

/// Prints toasts to stderr so stdout stays machine-readable.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, toast: Toast) {
        eprintln!("{}", render_toast(&toast));
    }
}

/// There is no page to move between; navigation is only logged.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn push(&self, route: &str) {
        tracing::debug!(route, "navigate");
    }

    fn refresh(&self) {
        tracing::debug!("refresh");
    }
}

fn render_toast(toast: &Toast) -> String {
    let marker = if toast.is_error() { "error" } else { "ok" };
    format!("[{marker}] {}: {}", toast.title, toast.description)
}

fn parse_role(raw: &str) -> Result<Role, String> {
    Role::parse(raw).ok_or_else(|| format!("unknown role {raw:?}; expected teacher or admin"))
}

fn parse_status(raw: &str) -> Result<AttendanceStatus, String> {
    AttendanceStatus::parse(raw).ok_or_else(|| {
        let allowed: Vec<&str> = AttendanceStatus::ALL.iter().map(|s| s.as_str()).collect();
        format!("unknown status {raw:?}; expected one of {}", allowed.join(", "))
    })
}

/// Validate an optional `YYYY-MM-DD` argument without reformatting it.
fn checked_date(raw: Option<String>) -> Result<Option<String>, CliError> {
    match raw {
        Some(date) if parse_iso_date(&date).is_none() => Err(CliError::InvalidDate(date)),
        other => Ok(other),
    }
}

fn with_date(path: &str, date: Option<&str>) -> String {
    match date {
        Some(date) => format!("{path}?date={date}"),
        None => path.to_owned(),
    }
}

fn expect_success(response: ApiResponse) -> Result<ApiResponse, CliError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(CliError::ServerError {
        status: response.status,
        message: response.error_message().unwrap_or_else(|| response.body.to_string()),
    })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

// =============================================================================
// COMMANDS
// =============================================================================

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let timeouts = Timeouts { request_secs: cli.timeout_secs, ..Timeouts::default() };
    let api = Arc::new(HttpApi::new(&cli.base_url, cli.session_token.as_deref(), timeouts)?);

    match cli.command {
        Command::Ping => run_ping(&api).await,
        Command::Login { email, password } => run_login(api, email, password).await,
        Command::Signup { name, email, password, confirm_password, role } => {
            let confirm_password = confirm_password.unwrap_or_else(|| password.clone());
            run_signup(api, name, email, password, confirm_password, role).await
        }
        Command::Logout => run_logout(api).await,
        Command::Me => {
            let response = expect_success(api.get_json(ME_ENDPOINT).await?)?;
            let user: User = response.json()?;
            println!("{} <{}> ({})", user.name, user.email, user.role.as_str());
            Ok(())
        }
        Command::Students(students) => run_students(&api, students).await,
        Command::Attendance(attendance) => run_attendance(&api, attendance).await,
    }
}

async fn run_ping(api: &HttpApi) -> Result<(), CliError> {
    let response = api.get_json("/healthz").await?;
    expect_success(response)?;
    println!("ok");
    Ok(())
}

async fn run_login(api: Arc<HttpApi>, email: String, password: String) -> Result<(), CliError> {
    let form = AuthForm::new(api.clone(), Arc::new(TerminalNotifier), Arc::new(TerminalNavigator))
        .with_grace_delay(Duration::ZERO);
    form.update(|state| {
        state.login.email = email;
        state.login.password = password;
    });

    match form.submit_login().await {
        SubmitOutcome::Succeeded => {
            // The session cookie now lives in the client's cookie store.
            let response = expect_success(api.get_json(SESSION_TOKEN_ENDPOINT).await?)?;
            let token = response.body["token"].as_str().unwrap_or_default();
            println!("{token}");
            Ok(())
        }
        outcome => Err(CliError::Rejected(format!("login {outcome:?}").to_lowercase())),
    }
}

async fn run_signup(
    api: Arc<HttpApi>,
    name: String,
    email: String,
    password: String,
    confirm_password: String,
    role: Role,
) -> Result<(), CliError> {
    let form = AuthForm::new(api, Arc::new(TerminalNotifier), Arc::new(TerminalNavigator));
    form.update(|state| {
        state.signup.name = name;
        state.signup.email = email;
        state.signup.password = password;
        state.signup.confirm_password = confirm_password;
        state.signup.role = role;
    });

    match form.submit_signup().await {
        SubmitOutcome::Succeeded => Ok(()),
        outcome => Err(CliError::Rejected(format!("signup {outcome:?}").to_lowercase())),
    }
}

async fn run_logout(api: Arc<HttpApi>) -> Result<(), CliError> {
    let header = HeaderController::new(api as Arc<dyn AuthApi>, Arc::new(TerminalNavigator));
    match header.logout().await {
        LogoutOutcome::Confirmed => eprintln!("[ok] signed out"),
        LogoutOutcome::ServerRejected(status) => eprintln!("[warn] server answered HTTP {status}; local session dropped"),
        LogoutOutcome::Unreachable => eprintln!("[warn] server unreachable; local session dropped"),
    }
    Ok(())
}

async fn run_students(api: &HttpApi, students: StudentsCommand) -> Result<(), CliError> {
    match students.command {
        StudentsSubcommand::List { class_name } => {
            let path = match class_name {
                Some(class_name) => format!("/api/students?class_name={class_name}"),
                None => "/api/students".to_owned(),
            };
            let response = expect_success(api.get_json(&path).await?)?;
            let students: Vec<Student> = response.json()?;
            for s in &students {
                println!("{}\t{}\t{}\t{}", s.id, s.class_name, s.roll_number, s.name);
            }
            Ok(())
        }
        StudentsSubcommand::Add { name, roll_number, class_name } => {
            let body = serde_json::to_value(NewStudent { name, roll_number, class_name })?;
            let response = expect_success(api.post_resource("/api/students", body).await?)?;
            print_json(&response.body)
        }
        StudentsSubcommand::Remove { student_id } => {
            expect_success(api.delete(&format!("/api/students/{student_id}")).await?)?;
            eprintln!("[ok] removed {student_id}");
            Ok(())
        }
    }
}

async fn run_attendance(api: &HttpApi, attendance: AttendanceCommand) -> Result<(), CliError> {
    match attendance.command {
        AttendanceSubcommand::List { date } => {
            let date = checked_date(date)?;
            let response = expect_success(api.get_json(&with_date("/api/attendance", date.as_deref())).await?)?;
            let records: Vec<AttendanceRecord> = response.json()?;
            for r in &records {
                println!("{}\t{}\t{}\t{}", r.date, r.student_name, r.status.as_str(), r.note.as_deref().unwrap_or(""));
            }
            Ok(())
        }
        AttendanceSubcommand::Mark { student_id, status, date, note } => {
            let body = serde_json::to_value(MarkAttendance {
                student_id: student_id.to_string(),
                date: checked_date(date)?,
                status,
                note,
            })?;
            let response = expect_success(api.put_json("/api/attendance", body).await?)?;
            print_json(&response.body)
        }
        AttendanceSubcommand::Summary { date } => {
            let date = checked_date(date)?;
            let path = with_date("/api/attendance/summary", date.as_deref());
            let response = expect_success(api.get_json(&path).await?)?;
            let summary: DailySummary = response.json()?;
            println!(
                "{}: {} students, {} present, {} absent, {} late, {} excused, {} unmarked ({:.1}% attending)",
                summary.date,
                summary.total_students,
                summary.present,
                summary.absent,
                summary.late,
                summary.excused,
                summary.unmarked,
                summary.attendance_rate(),
            );
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
