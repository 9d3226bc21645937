use futures::executor::block_on;
use mmdpreview::compiler::{self, ARCHITECTURE_SERVICE_DIR, DEFAULT_PREFIX, PROBLEMATIC_NAMES};
use mmdpreview::preview::HostMessage;
use mmdpreview::settings::BUNDLED_AWS_PACK_FILE;
use mmdpreview::{IconTable, LoadReport, PackLoader, PreviewSettings};
use serde::Serialize;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

/// Environment variable holding the `tracing` filter directives.
const LOG_ENV: &str = "MMDPREVIEW_LOG";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Preview(mmdpreview::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Preview(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<mmdpreview::Error> for CliError {
    fn from(value: mmdpreview::Error) -> Self {
        Self::Preview(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Compile,
    Load,
}

#[derive(Debug, Default)]
struct Args {
    command: Option<Command>,
    vendor_dir: Option<String>,
    table: Option<String>,
    prefix: Option<String>,
    out: Option<String>,
    no_suggest: bool,
    settings: Option<String>,
    workspace: Option<String>,
    extension_dir: Option<String>,
    no_defaults: bool,
    init: Option<String>,
    pretty: bool,
}

fn usage() -> &'static str {
    "mmdpreview\n\
\n\
USAGE:\n\
  mmdpreview compile --vendor-dir <dir> [--table <table.json>] [--prefix <name>] [--out <path>] [--no-suggest]\n\
  mmdpreview load [--settings <settings.json>] [--workspace <dir>] [--extension-dir <dir>] [--no-defaults] [--init <diagram.mmd>] [--pretty]\n\
\n\
NOTES:\n\
  - compile reads vendor SVG files below <dir> and writes an icon pack (default ./aws-icons.json).\n\
  - Without --table, compile uses the built-in AWS architecture-service table.\n\
  - load resolves the configured icon packs (user packs first, then the built-in defaults)\n\
    and prints a summary; --init prints the init message a preview would receive instead.\n\
  - Set MMDPREVIEW_LOG (e.g. `debug`) to control diagnostics written to stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "compile" | "load" if args.command.is_some() => {
                return Err(CliError::Usage(usage()));
            }
            "compile" => args.command = Some(Command::Compile),
            "load" => args.command = Some(Command::Load),
            "--no-suggest" => args.no_suggest = true,
            "--no-defaults" => args.no_defaults = true,
            "--pretty" => args.pretty = true,
            "--vendor-dir" => args.vendor_dir = Some(value(&mut it)?),
            "--table" => args.table = Some(value(&mut it)?),
            "--prefix" => {
                let prefix = value(&mut it)?;
                if prefix.trim().is_empty() {
                    return Err(CliError::Usage(usage()));
                }
                args.prefix = Some(prefix);
            }
            "--out" => args.out = Some(value(&mut it)?),
            "--settings" => args.settings = Some(value(&mut it)?),
            "--workspace" => args.workspace = Some(value(&mut it)?),
            "--extension-dir" => args.extension_dir = Some(value(&mut it)?),
            "--init" => args.init = Some(value(&mut it)?),
            _ => return Err(CliError::Usage(usage())),
        }
    }

    let Some(command) = args.command else {
        return Err(CliError::Usage(usage()));
    };
    if matches!(command, Command::Compile) && args.vendor_dir.is_none() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<String, CliError> {
    it.next().cloned().ok_or(CliError::Usage(usage()))
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .init();
}

fn run_compile(args: &Args) -> Result<(), CliError> {
    let vendor_dir = PathBuf::from(args.vendor_dir.as_deref().unwrap_or("."));
    let table = match args.table.as_deref() {
        Some(path) => IconTable::from_json_str(&std::fs::read_to_string(path)?)?,
        None => IconTable::aws(),
    };
    let prefix = args.prefix.as_deref().unwrap_or(DEFAULT_PREFIX);
    let out = PathBuf::from(args.out.as_deref().unwrap_or(BUNDLED_AWS_PACK_FILE));

    if !args.no_suggest {
        print_suggestions(&vendor_dir.join(ARCHITECTURE_SERVICE_DIR))?;
    }

    let total = table.len();
    let report = compiler::compile_pack_with(&vendor_dir, &table, prefix, |idx, entry| {
        let status = match &entry.outcome {
            compiler::EntryOutcome::Compiled => "ok".to_string(),
            compiler::EntryOutcome::Failed(err) => format!("FAILED  {err}"),
        };
        println!("[{:>3}/{total}] {:<22}{status}", idx + 1, entry.name);
    });

    let bytes = compiler::write_pack(&report.document, &out)?;
    println!();
    println!(
        "{} icons, {} failed, {:.1} KB -> {}",
        report.succeeded(),
        report.failed(),
        bytes as f64 / 1024.0,
        out.display()
    );
    if report.failed() > 0 {
        println!("Failed: {}", report.failed_names().join(", "));
    }
    println!();
    println!("Example .mmd usage:");
    println!("  architecture-beta");
    println!("    service fn({prefix}:lambda)[Lambda]");
    println!("    service store({prefix}:s3)[S3]");
    Ok(())
}

fn print_suggestions(dir: &Path) -> Result<(), CliError> {
    let suggestions = compiler::suggest_candidates(dir, PROBLEMATIC_NAMES)?;
    if suggestions.is_empty() {
        return Ok(());
    }
    println!("Candidate files for commonly mismatched names:");
    for suggestion in &suggestions {
        let candidates = if suggestion.candidates.is_empty() {
            "NOT FOUND".to_string()
        } else {
            suggestion.candidates.join(", ")
        };
        println!("  {}: {candidates}", suggestion.name);
    }
    println!();
    Ok(())
}

fn run_load(args: &Args) -> Result<(), CliError> {
    let mut settings = match args.settings.as_deref() {
        Some(path) => PreviewSettings::from_json_str(&std::fs::read_to_string(path)?)?,
        None => PreviewSettings::default(),
    };
    if args.no_defaults {
        settings.preload_defaults = false;
    }

    let extension_dir = PathBuf::from(args.extension_dir.as_deref().unwrap_or("."));
    let loader = PackLoader::new().with_workspace_root(args.workspace.clone());
    let descriptors = settings.descriptors(&extension_dir);
    let report = block_on(loader.load(&descriptors));

    match args.init.as_deref() {
        Some(path) => {
            let message = HostMessage::Init {
                content: std::fs::read_to_string(path)?,
                icon_packs: report.packs,
                theme: settings.theme().to_string(),
            };
            write_json(&message, args.pretty)
        }
        None => {
            print_load_report(&report);
            Ok(())
        }
    }
}

fn print_load_report(report: &LoadReport) {
    for pack in &report.packs {
        println!("{:<16}{} icons", pack.name, pack.icons.len());
    }
    println!(
        "{} loaded, {} failed",
        report.packs.len(),
        report.warnings.len()
    );
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command.unwrap_or_default() {
        Command::Compile => run_compile(&args),
        Command::Load => run_load(&args),
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing();

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
