mod file_store;
mod http;


use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use session::{Decision, Gender, Identity, RegisterProfile, SessionError, SessionStore, authorize_path};

use crate::file_store::FileStorage;
use crate::http::{ReqwestAuthApi, fetch_appointments};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not signed in; run `carepoint login` first")]
    NotSignedIn,
    #[error("{0}")]
    Session(#[from] SessionError),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned HTTP {status}: {message}")]
    Service { status: u16, message: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "carepoint", about = "CarePoint session and appointment CLI")]
struct Cli {
    #[arg(long, env = "CAREPOINT_AUTH_URL", default_value = "http://localhost:8081/api")]
    auth_url: String,

    #[arg(long, env = "CAREPOINT_APPOINTMENT_URL", default_value = "http://localhost:8082/api")]
    appointment_url: String,

    #[arg(long, env = "CAREPOINT_SESSION_FILE", default_value = ".carepoint-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and persist the issued token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "CAREPOINT_PASSWORD")]
        password: String,
    },
    /// Create a patient account and sign in as it.
    Register(RegisterArgs),
    /// Forget the persisted session.
    Logout,
    /// Show the signed-in identity.
    Whoami,
    /// Ask the route guard whether `path` would render.
    Check { path: String },
    /// List the signed-in user's appointments.
    Appointments,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "CAREPOINT_PASSWORD")]
    password: String,
    /// Defaults to `--password`.
    #[arg(long)]
    confirm_password: Option<String>,
    #[arg(long)]
    phone_number: String,
    /// `YYYY-MM-DD`.
    #[arg(long)]
    date_of_birth: String,
    #[arg(long, default_value = "MALE")]
    gender: Gender,
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    #[arg(long)]
    zip_code: String,
}

impl RegisterArgs {
    fn into_profile(self) -> RegisterProfile {
        let confirm_password = self.confirm_password.unwrap_or_else(|| self.password.clone());
        RegisterProfile {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password: self.password,
            confirm_password,
            phone_number: self.phone_number,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
        }
    }
}

type CliStore = SessionStore<FileStorage, ReqwestAuthApi>;

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let store: CliStore =
        SessionStore::new(FileStorage::new(&cli.session_file), ReqwestAuthApi::new(client.clone(), &cli.auth_url));
    store.rehydrate();

    match cli.command {
        Command::Login { email, password } => {
            let identity = store.login(&email, &password).await?;
            println!("{}", describe_identity(&identity));
        }
        Command::Register(args) => {
            let identity = store.register(&args.into_profile()).await?;
            println!("{}", describe_identity(&identity));
        }
        Command::Logout => {
            store.logout();
            println!("signed out");
        }
        Command::Whoami => match store.identity() {
            Some(identity) => println!("{}", describe_identity(&identity)),
            None => println!("not signed in"),
        },
        Command::Check { path } => {
            println!("{}", describe_decision(authorize_path(&path, &store.snapshot())));
        }
        Command::Appointments => {
            let token = store.bearer_token().ok_or(CliError::NotSignedIn)?;
            let appointments = fetch_appointments(&client, &cli.appointment_url, &token).await?;
            println!("{}", serde_json::to_string_pretty(&appointments)?);
        }
    }
    Ok(())
}

fn describe_identity(identity: &Identity) -> String {
    let roles: Vec<&str> = identity.roles.iter().map(String::as_str).collect();
    let mut line = format!("{} [{}]", identity.subject_email, roles.join(", "));
    if identity.has_elevated_role() {
        line.push_str(" (staff)");
    }
    line
}

fn describe_decision(decision: Decision) -> String {
    match decision {
        Decision::Wait => "wait".to_owned(),
        Decision::Render => "render".to_owned(),
        Decision::RedirectTo(destination) => format!("redirect {}", destination.path()),
    }
}
