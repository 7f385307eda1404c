mod error_formatter;
mod formatter;
mod interactive;
mod server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use formatter::Formatter;
use std::fs;
use std::path::{Path, PathBuf};
use tally::Sheet;

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "A calculator that thinks in lines.")]
#[command(
    long_about = "Tally evaluates sheets of calculator lines. Each line can assign $variables and refer to\nthe results of earlier lines with $1, $2, ... Editing a line updates everything below it.\nThe CLI evaluates sheet files, offers an interactive line editor, and can serve a sheet over HTTP."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a sheet file and display every line's result
    ///
    /// Each line of the file is one sheet line. Blank lines and lines starting
    /// with # or // are kept as they are and have no result.
    Run {
        /// Sheet file to evaluate
        file: PathBuf,
        /// Output one result per line (for piping to other tools)
        #[arg(short = 'r', long, conflicts_with = "json")]
        raw: bool,
        /// Output the evaluated sheet as JSON
        #[arg(short = 'j', long)]
        json: bool,
        /// Show a diagnostic for every line that could not be parsed
        #[arg(short = 'e', long)]
        explain: bool,
    },
    /// List the variables a sheet defines and their final values
    Vars {
        /// Sheet file to evaluate
        file: PathBuf,
    },
    /// Edit a sheet line by line in the terminal
    ///
    /// Plain input appends a line. Commands: :set N text, :insert N text,
    /// :remove N, :clear, :vars, :show, :quit
    Interactive {
        /// Sheet file to start from
        file: Option<PathBuf>,
    },
    /// Start HTTP REST API server (default: localhost:3000)
    ///
    /// Serves one shared sheet. Every route answers with the evaluated sheet as JSON.
    /// API: GET /sheet, POST /sheet with {lines}, PUT|POST|DELETE /sheet/lines/{index}
    Server {
        /// Sheet file to load at startup
        file: Option<PathBuf>,
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port number to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run {
            file,
            raw,
            json,
            explain,
        } => run_command(file, *raw, *json, *explain),
        Commands::Vars { file } => vars_command(file),
        Commands::Interactive { file } => interactive_command(file.as_deref()),
        Commands::Server { file, host, port } => server_command(file.as_deref(), host, *port),
    };

    if let Err(e) = result {
        if let Some(tally_err) = e.downcast_ref::<tally::TallyError>() {
            eprintln!("{}", error_formatter::format_error(tally_err, "input", ""));
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

/// Logs go to stderr so they never mix with results on stdout
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_command(file: &Path, raw: bool, json: bool, explain: bool) -> Result<()> {
    let mut sheet = Sheet::new();
    let lines = sheet.evaluate(&read_sheet(file)?);
    let formatter = Formatter::default();

    if json {
        println!("{}", tally::serializers::to_json_string(&lines, sheet.scope())?);
    } else if raw {
        print!("{}", formatter.format_raw(&lines));
    } else {
        print!("{}", formatter.format_sheet(&lines));
    }

    if explain {
        let source_id = file.display().to_string();
        for line in &lines {
            if let Some(err) = &line.diagnostic {
                let id = format!("{}:{}", source_id, line.line_number());
                eprintln!("{}", error_formatter::format_error(err, &id, &line.input));
            }
        }
    }

    Ok(())
}

fn vars_command(file: &Path) -> Result<()> {
    let mut sheet = Sheet::new();
    sheet.evaluate(&read_sheet(file)?);

    let formatter = Formatter::default();
    print!("{}", formatter.format_variables(sheet.scope()));

    Ok(())
}

fn interactive_command(file: Option<&Path>) -> Result<()> {
    let mut sheet = Sheet::new();
    if let Some(path) = file {
        sheet.evaluate(&read_sheet(path)?);
    }

    interactive::run_interactive(&mut sheet)
}

fn server_command(file: Option<&Path>, host: &str, port: u16) -> Result<()> {
    #[cfg(feature = "server")]
    {
        use tokio::runtime::Runtime;
        let rt = Runtime::new()?;
        rt.block_on(async {
            let mut sheet = Sheet::new();
            if let Some(path) = file {
                sheet.evaluate(&read_sheet(path)?);
            }

            println!("Starting HTTP server with {} line(s) loaded", sheet.len());
            server::http::start_server(sheet, host, port).await
        })?;
    }

    #[cfg(not(feature = "server"))]
    {
        let _ = (file, host, port);
        eprintln!("Error: Server feature not enabled");
        eprintln!("Recompile with: cargo build --features server");
        std::process::exit(1);
    }

    Ok(())
}

/// Read a sheet file, one input per line
fn read_sheet(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sheet file {}", path.display()))?;
    Ok(text.lines().map(str::to_string).collect())
}
