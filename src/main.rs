use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::error;

use trip_planner_lib::{
    commands::{settings, trips, users},
    core::{
        config::AppConfig,
        errors::{AppError, AppResult},
        types::{CurrentUser, Provider, TripStatus},
    },
    init_logging,
    planner::{normalizer::normalize, trip_plan::trip_plan_schema},
    AppState,
};

#[derive(Parser)]
#[command(name = "trip-planner")]
#[command(about = "Plan trips with a hosted language model and keep them locally")]
#[command(version)]
struct Cli {
    /// Signed-in user id used to attribute and scope trips
    #[arg(long, global = true, env = "TRIP_PLANNER_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a raw model response read from a file or stdin
    Normalize {
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print the JSON schema of a trip plan
    Schema,
    /// List budget and traveler options
    Options,
    /// Store the Gemini API key in the OS keyring
    SetKey {
        #[arg(long)]
        key: String,
    },
    /// Record a sign-in for --user
    SignIn {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        photo_url: Option<String>,
    },
    /// Show the profile of --user
    Profile,
    /// Generate a trip plan, optionally saving it
    Generate {
        #[arg(long)]
        destination: String,
        #[arg(long)]
        days: u32,
        /// Budget option id or title (e.g. 2 or "Standard")
        #[arg(long)]
        budget: String,
        /// Traveler option id or title (e.g. 1 or "Solo Trip")
        #[arg(long)]
        traveler: String,
        #[arg(long)]
        save: bool,
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },
    /// List trips of --user, newest first
    List,
    /// Show one trip
    Show { trip_id: String },
    /// Search trips of --user by destination and tags
    Search {
        #[arg(long)]
        query: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Trip statistics for --user
    Stats,
    /// Change a trip status (generated, saved, archived)
    SetStatus { trip_id: String, status: String },
    /// Delete a trip owned by --user
    Delete { trip_id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = err.code(), "{err}");
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&err).unwrap_or_else(|_| err.to_string())
            );
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let user = cli.user.as_deref().map(CurrentUser::new);

    // Commands that never touch the store.
    match &cli.command {
        Commands::Normalize { file } => {
            let raw = read_input(file.as_ref()).await?;
            return print_json(&normalize(&raw));
        }
        Commands::Schema => return print_json(&trip_plan_schema()),
        _ => {}
    }

    let config = AppConfig::from_env()?;
    let state = AppState::bootstrap(config).await?;
    let user = user.as_ref();

    match cli.command {
        Commands::Normalize { .. } | Commands::Schema => Ok(()),
        Commands::Options => print_json(&settings::list_options(&state)),
        Commands::SetKey { key } => {
            print_json(&settings::set_provider_key(&state, Provider::Gemini, key).await?)
        }
        Commands::SignIn {
            email,
            name,
            photo_url,
        } => {
            let mut identity = user
                .cloned()
                .ok_or_else(|| AppError::Unauthenticated("pass --user to sign in".to_string()))?;
            identity.email = email;
            identity.display_name = name;
            print_json(&users::sign_in(&state, &identity, photo_url).await?)
        }
        Commands::Profile => print_json(&users::get_profile(&state, user).await?),
        Commands::Generate {
            destination,
            days,
            budget,
            traveler,
            save,
            api_key,
        } => {
            let request = trips::build_request(&destination, days, &budget, &traveler)?;
            let generated = trips::generate_trip(&state, user, request.clone(), api_key).await?;
            if let Some(warning) = &generated.warning {
                eprintln!("{warning}");
            }
            print_json(&generated)?;
            if save {
                print_json(&trips::save_trip(&state, user, &request, &generated.trip).await?)?;
            }
            Ok(())
        }
        Commands::List => print_json(&trips::list_trips(&state, user).await?),
        Commands::Show { trip_id } => print_json(&trips::get_trip(&state, &trip_id).await?),
        Commands::Search { query, tags } => {
            print_json(&trips::search_trips(&state, user, query.as_deref(), &tags).await?)
        }
        Commands::Stats => print_json(&trips::trip_stats(&state, user).await?),
        Commands::SetStatus { trip_id, status } => {
            let status = TripStatus::from_str(&status)
                .ok_or_else(|| AppError::InvalidInput(format!("unknown status {status}")))?;
            print_json(&trips::update_trip_status(&state, user, &trip_id, status).await?)
        }
        Commands::Delete { trip_id } => {
            print_json(&trips::delete_trip(&state, user, &trip_id).await?)
        }
    }
}

async fn read_input(file: Option<&PathBuf>) -> AppResult<String> {
    match file {
        Some(path) => Ok(tokio::fs::read_to_string(path).await?),
        None => {
            let mut raw = String::new();
            tokio::io::stdin().read_to_string(&mut raw).await?;
            Ok(raw)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Internal(err.to_string()))?;
    println!("{text}");
    Ok(())
}
