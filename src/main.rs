//! SmartMeet CLI
//!
//! Terminal front-end for SmartMeet:
//! - Sign up, sign in and out
//! - Dashboard statistics
//! - Schedule meetings and review meetings and sent invitations
//! - Settings panels and Google Calendar connection

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use smartmeet::api::ApiClient;
use smartmeet::config::{generate_default_config, Config, LoggingConfig};
use smartmeet::session::{FileCredentialStore, SessionContext};
use smartmeet::views::{
    verify_session, AuthOutcome, CalendarIntegration, Dashboard, EmailLogsView, LoadState,
    LoginForm, MeetingsView, Route, ScheduleForm, Settings, SettingsTab, SignupForm, Theme, View,
};

#[derive(Parser)]
#[command(name = "smartmeet")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "AI-powered meeting scheduler")]
#[command(long_about = "SmartMeet schedules meetings from plain-language requests.\nThis client talks to a SmartMeet backend over its REST API.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides config file and SMARTMEET_API_BASE_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: platform config dir, then ./smartmeet.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print raw JSON instead of rendered views
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Agree to the Terms of Service and Privacy Policy
        #[arg(long)]
        agree_to_terms: bool,
    },

    /// Sign in
    Login {
        email: String,
        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Check the backend
    Health,

    /// Show dashboard statistics
    Dashboard,

    /// Schedule a meeting from a plain-language request
    Schedule {
        /// What to schedule, e.g. "find a time next week"
        query: String,
        /// Participant e-mail addresses (repeat or comma-separate)
        #[arg(short, long = "email", required = true)]
        emails: Vec<String>,
    },

    /// List meetings
    Meetings,

    /// List sent invitation e-mails
    EmailLogs,

    /// Show a settings panel
    Settings {
        #[arg(long, default_value_t = SettingsTab::Profile)]
        tab: SettingsTab,
    },

    /// Google Calendar integration
    Calendar {
        #[command(subcommand)]
        action: CalendarAction,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Show connection status
    Status,
    /// Print the URL that connects a Google Calendar
    Connect,
    /// Disconnect the calendar
    Disconnect,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url);
    }

    init_logging(&config.logging);
    tracing::debug!("API base URL: {}", config.api.base_url);

    let session = SessionContext::open(FileCredentialStore::new(&config.session.file));
    let client = ApiClient::new(&config.api.base_url, Arc::clone(&session))
        .context("Failed to create HTTP client")?;

    match cli.command {
        Commands::Signup {
            first_name,
            last_name,
            email,
            password,
            agree_to_terms,
        } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };
            let mut form = SignupForm {
                first_name,
                last_name,
                email,
                password,
                agree_to_terms,
                ..Default::default()
            };
            let outcome = form.submit(&client).await;
            let told = form.error.is_some() || form.notice.is_some();
            finish_auth(outcome, &form.render(), told, &session);
        }

        Commands::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };
            let mut form = LoginForm::new(email, password);
            let outcome = form.submit(&client).await;
            let told = form.error.is_some() || form.notice.is_some();
            finish_auth(outcome, &form.render(), told, &session);
        }

        Commands::Logout => {
            session.sign_out().context("Failed to clear session")?;
            println!("Signed out.");
            println!("Next: smartmeet {}", command_for(Route::Login));
        }

        Commands::Whoami => whoami(&client, &session, cli.json).await?,

        Commands::Health => match client.health_check().await {
            Ok(health) if cli.json => print_json(&health)?,
            Ok(health) => {
                println!("SmartMeet client v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!("API: {}", client.base_url());
                println!("Status: {}", if health.status.is_empty() { "unknown" } else { &health.status });
                if let Some(message) = &health.message {
                    println!("Message: {}", message);
                }
            }
            Err(e) => fail(&e.user_message()),
        },

        Commands::Dashboard => {
            let mut dashboard = Dashboard::new();
            dashboard.load(&client).await;
            if cli.json {
                print_json(dashboard.stats())?;
            } else {
                print!("{}", dashboard.render());
            }
        }

        Commands::Schedule { query, emails } => {
            // Flatten emails (support comma-separated)
            let emails: Vec<String> = emails
                .iter()
                .flat_map(|e| e.split(',').map(|s| s.trim().to_string()))
                .filter(|e| !e.is_empty())
                .collect();

            let mut form = ScheduleForm::new(query, emails);
            form.submit(&client).await;

            match (&form.error, &form.result) {
                (Some(error), _) => fail(error),
                (None, Some(result)) if cli.json => print_json(result)?,
                _ => print!("{}", form.render()),
            }
        }

        Commands::Meetings => {
            let mut view = MeetingsView::default();
            view.load(&client).await;
            render_list(&view, &view.state, cli.json)?;
        }

        Commands::EmailLogs => {
            let mut view = EmailLogsView::default();
            view.load(&client).await;
            render_list(&view, &view.state, cli.json)?;
        }

        Commands::Settings { tab } => {
            let theme: Theme = config.ui.theme.parse().unwrap_or_else(|e| {
                tracing::warn!("{}; using dark", e);
                Theme::Dark
            });
            let mut settings = Settings::new(&session, theme);
            settings.select(tab);
            settings.load(&client).await;
            print!("{}", settings.render());
        }

        Commands::Calendar { action } => {
            let mut calendar = CalendarIntegration::new();

            match action {
                CalendarAction::Status => {
                    calendar.check_status(&client).await;
                    if cli.json {
                        print_json(calendar.status())?;
                    } else {
                        print!("{}", calendar.render());
                    }
                }
                CalendarAction::Connect => match calendar.connect(&client).await {
                    Ok(Some(url)) => {
                        println!("Open this URL to connect Google Calendar:");
                        println!("  {}", url);
                    }
                    Ok(None) => println!("The server did not return an authorization URL."),
                    Err(message) => fail(&message),
                },
                CalendarAction::Disconnect => match calendar.disconnect(&client).await {
                    Ok(message) => println!("{}", message),
                    Err(message) => fail(&message),
                },
            }
        }

        Commands::Config { output } => write_default_config(output.as_ref())?,
    }

    Ok(())
}

/// Initialize tracing from the logging config. `RUST_LOG` wins when set.
fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("smartmeet={}", config.level).into());

    let json = config.format.eq_ignore_ascii_case("json");
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let pretty_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(pretty_layer)
        .init();
}

/// Report a submitted auth form. `told` is set when the form carries an
/// error or a server notice.
fn finish_auth(outcome: AuthOutcome, rendered: &str, told: bool, session: &SessionContext) {
    match outcome {
        AuthOutcome::Redirect(route) => {
            let name = session
                .user()
                .map(|u| u.display_name().to_string())
                .unwrap_or_default();
            if name.is_empty() {
                println!("Signed in.");
            } else {
                println!("Signed in as {}.", name);
            }
            println!("Next: smartmeet {}", command_for(route));
        }
        AuthOutcome::Stay if told => fail(rendered.trim_end()),
        AuthOutcome::Stay => fail(&format!(
            "{}The server did not start a session.",
            rendered
        )),
    }
}

fn command_for(route: Route) -> &'static str {
    route.path().trim_start_matches('/')
}

async fn whoami(client: &ApiClient, session: &SessionContext, json: bool) -> anyhow::Result<()> {
    let Some(credential) = session.credential() else {
        println!("Not signed in.");
        println!();
        println!("Sign in with:");
        println!("  smartmeet {} <email>", command_for(Route::Login));
        return Ok(());
    };

    match verify_session(client).await {
        Ok(user) if json => print_json(&user)?,
        Ok(user) => {
            println!("Name:      {}", user.name);
            println!("Email:     {}", user.email);
            println!(
                "Signed in: {}",
                credential.issued_at.format("%Y-%m-%d %H:%M UTC")
            );
        }
        Err(e) if e.is_unauthorized() => fail(&format!(
            "Session expired. Please sign in again with: smartmeet {} <email>",
            command_for(Route::Login)
        )),
        Err(e) => {
            eprintln!("{}", e.user_message());
            println!("Cached identity: {}", credential.user.display_name());
        }
    }

    Ok(())
}

fn render_list<V: View, T: Serialize>(view: &V, state: &LoadState<T>, json: bool) -> anyhow::Result<()> {
    match state {
        LoadState::Failed(message) => fail(message),
        LoadState::Loaded(items) if json => print_json(items),
        _ => {
            print!("{}", view.render());
            Ok(())
        }
    }
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            // Create parent directory if needed
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{}", label);
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Print an error for the user and exit with status 1
fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}
