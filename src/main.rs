//! Streamz CLI - command-line client for the Streamz catalog.
//!
//! Thin driver over the library: establishes a session, then runs one
//! catalog or account command and prints the result.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use streamz_client::models::{ContentFilter, RegistrationRequest};
use streamz_client::{ApiClient, Config, CredentialStore, SessionManager};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g. RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

const USAGE: &str = "\
Usage: streamz <command>

Commands:
  login                 Sign in (STREAMZ_USERNAME/STREAMZ_PASSWORD or prompt)
  register              Create an account interactively
  logout                Clear the stored session
  whoami                Show the current user profile
  movies                List movies
  series                List series
  documentaries         List documentaries
  search <query>        Search the catalog
  continue              Show continue-watching entries
  plans                 List subscription plans
";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1).map(String::as_str) else {
        eprint!("{}", USAGE);
        std::process::exit(2);
    };

    let mut config = Config::load()?;
    let api = ApiClient::new(config.api_base_url.clone())?;

    // STREAMZ_TOKEN_STORE=file switches to a plain-file slot for headless
    // environments without a usable keychain
    let store = if matches!(std::env::var("STREAMZ_TOKEN_STORE").as_deref(), Ok("file")) {
        CredentialStore::file(Config::data_dir()?)
    } else {
        CredentialStore::keyring()
    };
    let mut session = SessionManager::new(api, store);

    // Restore any persisted session before dispatching; commands that need
    // auth check the outcome themselves.
    session.initialize().await;

    match command {
        "login" => {
            let (username, password) = read_credentials(&config)?;
            match session.login(&username, &password).await {
                Ok(user) => {
                    println!("Signed in as {}", user.display_name());
                    config.last_username = Some(username);
                    config.save()?;
                }
                Err(rejection) => {
                    eprintln!("Login failed: {}", rejection.first_message());
                    std::process::exit(1);
                }
            }
        }
        "register" => {
            let request = read_registration()?;
            match session.register(&request).await {
                Ok(user) => println!("Account created, signed in as {}", user.display_name()),
                Err(rejection) => {
                    eprintln!("Registration failed: {}", rejection.first_message());
                    std::process::exit(1);
                }
            }
        }
        "logout" => {
            session.logout();
            println!("Signed out");
        }
        "whoami" => {
            require_session(&session);
            if let Some(user) = session.current_user() {
                println!("{} (id {})", user.display_name(), user.id);
                if let Some(ref plan) = user.plan_details {
                    println!(
                        "Plan: {} ({} screens, {})",
                        plan.name, plan.max_screens, plan.video_quality
                    );
                }
                if let Some(end) = user.subscription_end_date {
                    println!("Subscription active until {}", end);
                }
            }
        }
        "movies" => {
            require_session(&session);
            let movies = session.api().fetch_movies(&ContentFilter::default()).await?;
            print_content_list(&movies);
        }
        "series" => {
            require_session(&session);
            let series = session.api().fetch_series(&ContentFilter::default()).await?;
            print_content_list(&series);
        }
        "documentaries" => {
            require_session(&session);
            let docs = session
                .api()
                .fetch_documentaries(&ContentFilter::default())
                .await?;
            print_content_list(&docs);
        }
        "search" => {
            require_session(&session);
            let Some(query) = args.get(2) else {
                eprintln!("Usage: streamz search <query>");
                std::process::exit(2);
            };
            let results = session.api().search_content(query).await?;
            print_content_list(&results);
        }
        "continue" => {
            require_session(&session);
            let entries = session.api().fetch_continue_watching().await?;
            if entries.is_empty() {
                println!("Nothing in progress");
            }
            for entry in entries {
                let pct = entry.progress_percentage.unwrap_or(0.0);
                println!("{} - {:.0}% watched", entry.content.title, pct);
            }
        }
        "plans" => {
            let plans = session.api().fetch_plans().await?;
            for plan in plans {
                println!(
                    "{}: ${} ({} screens, {})",
                    plan.name, plan.price, plan.max_screens, plan.video_quality
                );
            }
        }
        other => {
            eprintln!("Unknown command: {}\n", other);
            eprint!("{}", USAGE);
            std::process::exit(2);
        }
    }

    Ok(())
}

fn require_session(session: &SessionManager) {
    if !session.is_authenticated() {
        eprintln!("Not signed in. Run `streamz login` first.");
        std::process::exit(1);
    }
}

fn print_content_list(items: &[streamz_client::models::Content]) {
    if items.is_empty() {
        println!("No content available");
        return;
    }
    for item in items {
        let year = item
            .release_year
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        println!("{}{}", item.title, year);
    }
}

fn read_credentials(config: &Config) -> Result<(String, String)> {
    if let (Ok(username), Ok(password)) = (
        std::env::var("STREAMZ_USERNAME"),
        std::env::var("STREAMZ_PASSWORD"),
    ) {
        if !username.is_empty() && !password.is_empty() {
            return Ok((username, password));
        }
    }

    let default_hint = config
        .last_username
        .as_deref()
        .map(|u| format!(" [{}]", u))
        .unwrap_or_default();
    let username = match prompt(&format!("Username{}: ", default_hint))? {
        u if u.is_empty() => config.last_username.clone().unwrap_or_default(),
        u => u,
    };
    let password = prompt("Password: ")?;
    Ok((username, password))
}

fn read_registration() -> Result<RegistrationRequest> {
    let username = prompt("Username: ")?;
    let email = prompt("Email: ")?;
    let password = prompt("Password: ")?;
    let password2 = prompt("Confirm password: ")?;
    let plan: i64 = prompt("Plan id: ")?.parse()?;
    let first_name = prompt("First name (optional): ")?;
    let last_name = prompt("Last name (optional): ")?;

    Ok(RegistrationRequest {
        username,
        email,
        password,
        password2,
        plan,
        first_name: (!first_name.is_empty()).then_some(first_name),
        last_name: (!last_name.is_empty()).then_some(last_name),
    })
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
