use clap::{Parser, ValueEnum};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tempfile::NamedTempFile;
use tracing::info;
use tracing_subscriber::EnvFilter;
use upiledgerlib::{
    config::{ExtractConfig, DEFAULT_GAP_THRESHOLD, DEFAULT_Y_TOLERANCE},
    error::Result,
    extract_pdf,
    formats::{csv::Csv, json::Json},
    model::LedgerDocument,
    traits::WriteFormat,
};

const EXIT_FAILURE: u8 = 1;
const EXIT_UNVERIFIED: u8 = 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Fmt {
    Json,
    Csv,
}

impl Fmt {
    fn extension(self) -> &'static str {
        match self {
            Fmt::Json => "json",
            Fmt::Csv => "csv",
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "upiledger",
    version,
    about = "Extract a verified transaction ledger from a UPI payment statement PDF"
)]
struct Cli {
    /// Statement PDF
    pdf_path: PathBuf,

    /// Output file (default: output/<pdf name>.<format>)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Do not print the verification report
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    #[arg(long = "format", value_enum, default_value_t = Fmt::Json)]
    format: Fmt,

    /// Horizontal gap (PDF units) above which a space is inserted
    #[arg(long = "gap-threshold", default_value_t = DEFAULT_GAP_THRESHOLD)]
    gap_threshold: f64,

    /// Vertical distance (PDF units) within which glyphs share a line
    #[arg(long = "y-tolerance", default_value_t = DEFAULT_Y_TOLERANCE)]
    y_tolerance: f64,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_UNVERIFIED),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "upiledger=warn,upiledgerlib=warn" } else { "upiledger=info,upiledgerlib=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Returns whether every verification check passed.
fn run(cli: &Cli) -> Result<bool> {
    let config = ExtractConfig {
        y_tolerance: cli.y_tolerance,
        gap_threshold: cli.gap_threshold,
    };
    info!(path = %cli.pdf_path.display(), "extracting transactions");
    let extraction = extract_pdf(&cli.pdf_path, &config)?;

    if !cli.quiet {
        println!("{}", extraction.report);
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.pdf_path, cli.format));
    write_atomically(&output, |w| write_ledger(w, cli.format, &extraction.document))?;
    info!(
        path = %output.display(),
        transactions = extraction.document.total_transactions,
        "ledger written"
    );

    Ok(extraction.report.passed)
}

fn write_ledger<W: Write>(w: W, format: Fmt, doc: &LedgerDocument) -> Result<()> {
    match format {
        Fmt::Json => Json::write(w, doc),
        Fmt::Csv => Csv::write(w, doc),
    }
}

/// Writes into a temporary file next to `output` and renames it over `output` only when
/// `write` succeeds. On failure the temporary file is removed and `output` is untouched.
fn write_atomically<F>(output: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<()>,
{
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write(&mut writer)?;
        writer.flush()?;
    }
    tmp.persist(output).map_err(|e| e.error)?;
    Ok(())
}

fn default_output_path(pdf: &Path, format: Fmt) -> PathBuf {
    let stem = pdf.file_stem().unwrap_or(pdf.as_os_str()).to_string_lossy();
    Path::new("output").join(format!("{stem}.{}", format.extension()))
}
