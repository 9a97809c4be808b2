use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use fen_diagram::api::{self, AppState};
use fen_diagram::config::Config;
use fen_diagram::diagram::{DiagramRequest, DiagramService, Render};
use fen_diagram::fonts::{AssetDir, Fonts};
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("fen-diagram")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders chess positions from FEN to PNG")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .env("DIAGRAM_CONFIG")
                .help("JSON config file")
                .global(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("assets")
                .long("assets")
                .value_name("DIR")
                .help("Directory holding the font files")
                .global(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .subcommand(
            Command::new("serve").about("Serve /diagram over HTTP (default)").arg(
                Arg::new("listen")
                    .long("listen")
                    .value_name("ADDR")
                    .help("Address to bind, e.g. 0.0.0.0:3000")
                    .value_parser(value_parser!(SocketAddr)),
            ),
        )
        .subcommand(
            Command::new("render")
                .about("Render a single diagram to a PNG file")
                .arg(Arg::new("fen").long("fen").required(true).help("FEN string"))
                .arg(
                    Arg::new("rev")
                        .long("rev")
                        .action(ArgAction::SetTrue)
                        .help("Draw the board from Black's side"),
                )
                .arg(
                    Arg::new("size")
                        .long("size")
                        .help("Board size in pixels")
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .required(true)
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let matches = cli().get_matches();

    let mut config = Config::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    if let Some(dir) = matches.get_one::<PathBuf>("assets") {
        config.asset_dir = dir.clone();
    }

    // Fonts are loaded once, before anything is drawn.
    let fonts = Fonts::load(&AssetDir::new(&config.asset_dir), &config.fonts)
        .with_context(|| format!("Failed to load fonts from {}", config.asset_dir.display()))?;
    let service = Arc::new(DiagramService::new(Arc::new(fonts)));

    match matches.subcommand() {
        Some(("render", args)) => render_to_file(&config, service.as_ref(), args),
        Some(("serve", args)) => {
            if let Some(listen) = args.get_one::<SocketAddr>("listen") {
                config.listen = *listen;
            }
            serve(config, service).await
        }
        _ => serve(config, service).await,
    }
}

async fn serve(config: Config, service: Arc<DiagramService>) -> Result<()> {
    let app = api::router(AppState {
        renderer: service,
        default_size: config.default_size,
        max_size: config.max_size,
    });

    let listener = TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen))?;
    tracing::info!(addr = %config.listen, "diagram server listening");

    axum::serve(listener, app).await.context("HTTP server failed")
}

fn render_to_file(config: &Config, service: &DiagramService, args: &ArgMatches) -> Result<()> {
    let size = args.get_one::<u32>("size").copied().unwrap_or(config.default_size);
    if size == 0 || size > config.max_size {
        bail!("Size should be a positive integer up to {}", config.max_size);
    }

    // required(true) on both
    let fen = args.get_one::<String>("fen").context("--fen is required")?;
    let out = args.get_one::<PathBuf>("out").context("--out is required")?;

    let png = service.render(&DiagramRequest {
        fen: fen.clone(),
        reversed: args.get_flag("rev"),
        size,
    })?;
    fs::write(out, &png).with_context(|| format!("Failed to write {}", out.display()))?;

    tracing::info!(path = %out.display(), bytes = png.len(), "diagram written");
    Ok(())
}
