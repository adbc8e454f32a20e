//! spansweep - window-scan span categorization CLI
//!
//! Tokenizes input text, runs either the exhaustive window scan or a
//! single-pass recognition over it, and prints the labeled spans.
//!
//! # Usage
//!
//! ```bash
//! # Window scan with the pattern recognizer
//! spansweep scan "Paid $100 on January 15, 2024."
//!
//! # Single-pass recognition (no window enumeration)
//! spansweep ents "Dr. Smith flew to Paris."
//!
//! # Machine-readable output
//! spansweep scan --format json -f document.txt
//!
//! # Bounded windows, strict failure handling
//! spansweep scan --max-window 8 --strict "..."
//!
//! # List built-in recognizers
//! spansweep recognizers
//! ```

use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};

use spansweep::{
    recognize_document, Document, ExtractorConfig, FailurePolicy, HeuristicRecognizer,
    PatternRecognizer, Recognizer, SpanCollection, SpanExtractor,
};

// ============================================================================
// CLI Structure
// ============================================================================

/// Window-scan span categorization over pluggable entity recognizers
#[derive(Parser)]
#[command(name = "spansweep")]
#[command(
    author,
    version,
    about = "Window-scan span categorization over pluggable entity recognizers",
    long_about = r#"
spansweep - span categorization by exhaustive window scanning

Every contiguous token range of the input is rendered to text and fed to
the recognizer in isolation; recognitions are shifted back into document
coordinates and deduplicated. This recovers entities a single full-text
pass misses, at O(n^3) cost.

RECOGNIZERS:
  pattern    - regex formats: dates, money, percentages (high precision)
  heuristic  - capitalization + context: PER/ORG/LOC (low precision)

EXAMPLES:
  spansweep scan "Paid $100 on January 15, 2024."
  spansweep ents --recognizer heuristic "Dr. Smith flew to Paris."
  spansweep scan --format map --max-window 6 -f document.txt
"#
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Text to scan (shorthand for `spansweep scan`)
    #[arg(trailing_var_arg = true)]
    text: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan every token window and collect recognized spans
    #[command(visible_alias = "s")]
    Scan(ScanArgs),

    /// Recognize the full text once, without window enumeration
    #[command(visible_alias = "e")]
    Ents(EntsArgs),

    /// List built-in recognizers
    #[command(visible_alias = "r")]
    Recognizers,
}

/// Recognizer selection
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum RecognizerKind {
    /// Regex formats only (dates, money, percentages)
    #[default]
    Pattern,
    /// Capitalization + context heuristics (PER/ORG/LOC)
    Heuristic,
}

impl RecognizerKind {
    fn create(self) -> Box<dyn Recognizer> {
        match self {
            Self::Pattern => Box::new(PatternRecognizer::new()),
            Self::Heuristic => Box::new(HeuristicRecognizer::new()),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Heuristic => "heuristic",
        }
    }
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Human-readable listing (default)
    #[default]
    Human,
    /// JSON array of spans
    Json,
    /// JSON lines (one span per line)
    Jsonl,
    /// Tab-separated values
    Tsv,
    /// JSON object mapping span text to label
    Map,
}

#[derive(Parser)]
struct ScanArgs {
    /// Input text to scan
    #[arg(short, long)]
    text: Option<String>,

    /// Read input from file ("-" for stdin)
    #[arg(short, long, value_name = "PATH")]
    file: Option<String>,

    /// Recognizer to drive the scan with
    #[arg(short, long, default_value = "pattern")]
    recognizer: RecognizerKind,

    /// Cap window length in tokens (default: unbounded)
    #[arg(long, value_name = "TOKENS")]
    max_window: Option<usize>,

    /// Scan windows across a worker pool
    #[arg(long)]
    parallel: bool,

    /// Abort the scan on the first recognizer failure instead of
    /// skipping the window
    #[arg(long)]
    strict: bool,

    /// Output format
    #[arg(long, default_value = "human")]
    format: OutputFormat,

    /// Only print the spans, no summary line
    #[arg(short, long)]
    quiet: bool,

    /// Positional text argument
    #[arg(trailing_var_arg = true)]
    positional: Vec<String>,
}

#[derive(Parser)]
struct EntsArgs {
    /// Input text to recognize
    #[arg(short, long)]
    text: Option<String>,

    /// Read input from file ("-" for stdin)
    #[arg(short, long, value_name = "PATH")]
    file: Option<String>,

    /// Recognizer to run
    #[arg(short, long, default_value = "pattern")]
    recognizer: RecognizerKind,

    /// Output format
    #[arg(long, default_value = "human")]
    format: OutputFormat,

    /// Only print the spans, no summary line
    #[arg(short, long)]
    quiet: bool,

    /// Positional text argument
    #[arg(trailing_var_arg = true)]
    positional: Vec<String>,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<(), String> = match cli.command {
        Some(Commands::Scan(args)) => cmd_scan(args),
        Some(Commands::Ents(args)) => cmd_ents(args),
        Some(Commands::Recognizers) => cmd_recognizers(),
        None => {
            // No subcommand: treat positional args as text to scan
            if cli.text.is_empty() {
                eprintln!("No input provided. Run `spansweep --help` for usage.");
                return ExitCode::FAILURE;
            }
            cmd_scan(ScanArgs {
                text: Some(cli.text.join(" ")),
                file: None,
                recognizer: RecognizerKind::default(),
                max_window: None,
                parallel: false,
                strict: false,
                format: OutputFormat::default(),
                quiet: false,
                positional: vec![],
            })
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_scan(args: ScanArgs) -> Result<(), String> {
    let text = get_input_text(&args.text, args.file.as_deref(), &args.positional)?;
    let doc = Document::from_text(&text);
    let recognizer = args.recognizer.create();

    let extractor = SpanExtractor::new(ExtractorConfig {
        max_window: args.max_window,
        failure_policy: if args.strict {
            FailurePolicy::Abort
        } else {
            FailurePolicy::Skip
        },
        parallel: args.parallel,
    });

    let start = Instant::now();
    let report = extractor
        .extract(&doc, recognizer.as_ref())
        .map_err(|e| format!("Scan failed: {e}"))?;
    let elapsed = start.elapsed();

    if !args.quiet && matches!(args.format, OutputFormat::Human) {
        println!(
            "ok: {} spans from {} windows in {:.1}ms (recognizer: {}, tokens: {}, failed windows: {})",
            report.spans.len(),
            report.windows_scanned,
            elapsed.as_secs_f64() * 1000.0,
            args.recognizer.name(),
            doc.len(),
            report.windows_failed,
        );
        println!();
    }

    print_spans(&report.spans, args.format)
}

fn cmd_ents(args: EntsArgs) -> Result<(), String> {
    let text = get_input_text(&args.text, args.file.as_deref(), &args.positional)?;
    let doc = Document::from_text(&text);
    let recognizer = args.recognizer.create();

    let start = Instant::now();
    let spans = recognize_document(&doc, recognizer.as_ref())
        .map_err(|e| format!("Recognition failed: {e}"))?;
    let elapsed = start.elapsed();

    if !args.quiet && matches!(args.format, OutputFormat::Human) {
        println!(
            "ok: {} entities in {:.1}ms (recognizer: {}, tokens: {})",
            spans.len(),
            elapsed.as_secs_f64() * 1000.0,
            args.recognizer.name(),
            doc.len(),
        );
        println!();
    }

    print_spans(&spans, args.format)
}

fn cmd_recognizers() -> Result<(), String> {
    let recognizers: Vec<Box<dyn Recognizer>> = vec![
        Box::new(PatternRecognizer::new()),
        Box::new(HeuristicRecognizer::new()),
    ];

    for r in &recognizers {
        println!("{:<12} {}", r.name(), r.description());
        println!("{:<12} labels: {}", "", r.labels().join(", "));
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Resolve input text from --text, --file/stdin, or positional args.
fn get_input_text(
    text: &Option<String>,
    file: Option<&str>,
    positional: &[String],
) -> Result<String, String> {
    if let Some(t) = text {
        return Ok(t.clone());
    }
    if let Some(path) = file {
        if path == "-" {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Failed to read stdin: {e}"))?;
            return Ok(buf);
        }
        return fs::read_to_string(path).map_err(|e| format!("Failed to read '{path}': {e}"));
    }
    if !positional.is_empty() {
        return Ok(positional.join(" "));
    }
    Err("No input provided. Pass text, --text, or --file.".to_string())
}

fn print_spans(spans: &SpanCollection, format: OutputFormat) -> Result<(), String> {
    match format {
        OutputFormat::Human => {
            if spans.is_empty() {
                println!("  (no spans found)");
            } else {
                for s in spans {
                    println!("[{}, {})\t{}\t{}", s.start, s.end, s.label, s.text);
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(spans)
                .map_err(|e| format!("Failed to serialize spans: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Jsonl => {
            for s in spans {
                let line = serde_json::to_string(s)
                    .map_err(|e| format!("Failed to serialize span: {e}"))?;
                println!("{line}");
            }
        }
        OutputFormat::Tsv => {
            println!("start\tend\tlabel\ttext");
            for s in spans {
                println!("{}\t{}\t{}\t{}", s.start, s.end, s.label, s.text);
            }
        }
        OutputFormat::Map => {
            let json = serde_json::to_string_pretty(&spans.label_map())
                .map_err(|e| format!("Failed to serialize label map: {e}"))?;
            println!("{json}");
        }
    }
    Ok(())
}
