use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use tracing_subscriber::EnvFilter;

use services::{GameService, IdentityProvider, ScoreReporter, ScoreRepository, WikiClient, WikiConfig};
use storage::{Storage, SupabaseConfig};
use ui::{App, UiApp, build_app_context};
use wikigolf_core::Clock;
use wikigolf_core::model::ThemeCatalog;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --wiki-api value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct Args {
    wiki_api: WikiConfig,
    offline: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut wiki_api = WikiConfig::from_env();
        let mut offline = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--wiki-api" => {
                    let value = require_value(args, "--wiki-api")?;
                    if value.trim().is_empty() || !value.starts_with("http") {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    wiki_api = WikiConfig::new(value);
                }
                "--offline" => offline = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { wiki_api, offline })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--wiki-api <url>] [--offline]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --wiki-api https://ja.wikipedia.org/w/api.php");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  WIKIGOLF_WIKI_API");
    eprintln!("  WIKIGOLF_SUPABASE_URL, WIKIGOLF_SUPABASE_ANON_KEY");
    eprintln!("  WIKIGOLF_SUPABASE_ACCESS_TOKEN (signed-in play)");
}

struct DesktopApp {
    game: Arc<GameService>,
    scores: Arc<dyn ScoreRepository>,
    identity: Arc<dyn IdentityProvider>,
}

impl UiApp for DesktopApp {
    fn game(&self) -> Arc<GameService> {
        Arc::clone(&self.game)
    }

    fn scores(&self) -> Arc<dyn ScoreRepository> {
        Arc::clone(&self.scores)
    }

    fn identity(&self) -> Arc<dyn IdentityProvider> {
        Arc::clone(&self.identity)
    }
}

fn select_storage(offline: bool) -> Storage {
    if offline {
        tracing::info!("offline play requested; scores stay in this process");
        return Storage::in_memory(Clock::default_clock());
    }
    match SupabaseConfig::from_env() {
        Some(config) => {
            if config.access_token.is_none() {
                tracing::info!("no access token configured; playing signed out");
            }
            Storage::supabase(config)
        }
        None => {
            tracing::warn!("Supabase project not configured; scores stay in this process");
            Storage::in_memory(Clock::default_clock())
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = select_storage(args.offline);
    let reporter = Arc::new(ScoreReporter::new(
        Arc::clone(&storage.identity),
        Arc::clone(&storage.scores),
    ));
    let game = Arc::new(GameService::new(
        ThemeCatalog::classic(),
        Arc::new(WikiClient::new(args.wiki_api)),
        reporter,
    ));

    let app = DesktopApp {
        game,
        scores: Arc::clone(&storage.scores),
        identity: Arc::clone(&storage.identity),
    };
    let context = build_app_context(&(Arc::new(app) as Arc<dyn UiApp>));

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Wikigolf")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
