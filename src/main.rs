use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::net::TcpListener;

use weswings_menu::api::{AppState, build_index, router};
use weswings_menu::logging::init_logger;
use weswings_menu::pipeline::{clean_text, process_document};
use weswings_menu::run::run;
use weswings_menu::source::extract_text;
use weswings_menu::store::MenuStore;
use weswings_menu::Settings;

#[derive(Parser)]
#[command(name = "weswings-menu", about = "Turn WesWings menu PDFs into formatted menus")]
struct Cli {
    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Debug logging for this crate
    #[arg(short, long)]
    verbose: bool,

    /// Override the document directory
    #[arg(long)]
    doc_dir: Option<String>,

    /// File breakfast specials under their own period
    #[arg(long)]
    breakfast_period: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download, extract, clean, format and announce menus
    Run {
        /// Reuse the PDFs already on disk
        #[arg(long)]
        no_download: bool,
        /// Wipe generated files first (the archive is kept)
        #[arg(long)]
        clear: bool,
        /// Send notifications even if disabled in the config
        #[arg(long)]
        notify: bool,
    },
    /// Print the text extracted from a PDF
    Extract { pdf: PathBuf },
    /// Print the cleaned text of an extracted text file
    Clean { path: PathBuf },
    /// Print the formatted menu of an extracted text file
    Format { path: PathBuf },
    /// Serve processed menus over HTTP
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn apply_overrides(settings: &mut Settings, cli: &Cli) {
    if let Some(dir) = &cli.doc_dir {
        settings.doc_dir = dir.clone();
    }
    if cli.breakfast_period {
        settings.breakfast_period = true;
    }
    match cli.command {
        Commands::Run {
            no_download,
            clear,
            notify,
        } => {
            if no_download {
                settings.download = false;
            }
            if clear {
                settings.clear = true;
            }
            if notify {
                settings.notify.enabled = true;
            }
        }
        Commands::Serve { port: Some(port) } => settings.server.port = port,
        _ => {}
    }
}

fn document_name(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "menu".to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref())?;
    apply_overrides(&mut settings, &cli);
    settings.validate()?;

    init_logger(&settings.logging, cli.verbose);
    // Another component may already have installed a provider.
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    match &cli.command {
        Commands::Run { .. } => {
            let summary = run(&settings).await?;
            println!(
                "Processed {} menus ({} failed)",
                summary.processed.len(),
                summary.failed.len()
            );
        }
        Commands::Extract { pdf } => {
            let bytes = std::fs::read(pdf)?;
            let text = extract_text(&bytes)?;
            print!("{text}");
        }
        Commands::Clean { path } => {
            let raw = std::fs::read_to_string(path)?;
            print!("{}", clean_text(&raw));
        }
        Commands::Format { path } => {
            let raw = std::fs::read_to_string(path)?;
            let menu = process_document(&document_name(path), &raw, settings.parse_options());
            for defect in &menu.defects {
                eprintln!("skipped: {defect}");
            }
            print!("{}", menu.formatted);
        }
        Commands::Serve { .. } => {
            let store = MenuStore::new(&settings.doc_dir);
            let options = settings.parse_options();
            // Reading and parsing files is blocking work.
            let menus = tokio::task::spawn_blocking(move || build_index(&store, options)).await??;
            let app = router(AppState::new(menus, options));

            let addr = settings.bind_addr();
            let listener = TcpListener::bind(&addr).await?;
            tracing::info!(%addr, "listening");
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
