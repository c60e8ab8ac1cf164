use anyhow::{Context, Result};
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use colored::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use wordfreq_core::config::{Config, DEFAULT_CONFIG_FILE};
use wordfreq_core::{logging, ReportFormat, SessionOutcome, SortOrder, WhitespaceMode, VERSION};

/// wordfreq - count whitespace-delimited tokens in a text file
///
/// Prints one `token: count` line per distinct token, most frequent first.
#[derive(Parser, Debug)]
#[command(name = "wordfreq")]
#[command(version = VERSION)]
#[command(about = "Token frequency report for a text file", long_about = None)]
struct Cli {
    /// Path to configuration file [default: ./wordfreq.toml if present]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// File to analyze (shorthand for `wordfreq analyze FILE`)
    file: Option<PathBuf>,

    #[command(flatten)]
    report: ReportArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Overrides for the `[analysis]`, `[report]` and `[logging]` config sections
#[derive(Args, Debug, Default)]
struct ReportArgs {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    format: Option<FormatArg>,

    /// Show only the N most frequent tokens
    #[arg(short = 'n', long, value_name = "N", global = true)]
    top: Option<usize>,

    /// Drop tokens seen fewer than N times
    #[arg(long, value_name = "N", global = true)]
    min_count: Option<u64>,

    /// Ordering of tokens with equal counts
    #[arg(long, value_enum, global = true)]
    order: Option<OrderArg>,

    /// Split on ASCII whitespace only
    #[arg(long, global = true)]
    ascii: bool,

    /// Fail on invalid UTF-8 instead of replacing it
    #[arg(long, global = true)]
    strict_utf8: bool,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Count tokens in FILE and print the report
    Analyze {
        /// File to analyze
        file: PathBuf,
    },

    /// Generate configuration file (CLI overrides included)
    GenerateConfig {
        /// Output path for config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,
    },

    /// Print shell completions to stdout
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum FormatArg {
    Text,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OrderArg {
    /// Equal counts sorted by token
    Token,
    /// Equal counts in order of first appearance
    FirstSeen,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
        }
    }
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Token => SortOrder::CountThenToken,
            OrderArg::FirstSeen => SortOrder::CountThenFirstSeen,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", format!("❌ {:#}", e).red());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let Cli {
        config,
        file,
        report,
        command,
    } = cli;

    match command {
        Some(Commands::Analyze { file }) => run_analyze(&file, config.as_deref(), &report),
        Some(Commands::GenerateConfig { output }) => {
            generate_config(&output, config.as_deref(), &report)
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "wordfreq", &mut io::stdout());
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Version) => {
            println!("{}", format!("wordfreq v{}", VERSION).bold());
            println!("Token frequency report for a text file");
            Ok(ExitCode::SUCCESS)
        }
        None => match file {
            Some(file) => run_analyze(&file, config.as_deref(), &report),
            None => {
                Cli::command().print_help()?;
                Ok(ExitCode::from(2))
            }
        },
    }
}

/// Result of one analysis, mapped to the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnalyzeStatus {
    Success,
    ReadFailure,
}

impl From<AnalyzeStatus> for ExitCode {
    fn from(status: AnalyzeStatus) -> Self {
        match status {
            AnalyzeStatus::Success => ExitCode::SUCCESS,
            AnalyzeStatus::ReadFailure => ExitCode::from(1),
        }
    }
}

/// Resolve config, start logging, then analyze against the real stdout/stderr
fn run_analyze(file: &Path, config_path: Option<&Path>, args: &ReportArgs) -> Result<ExitCode> {
    let config = load_config(config_path, args)?;

    let _guard = logging::init_logging(&config.logging).context("Failed to initialize logging")?;
    info!("wordfreq v{} starting", VERSION);
    debug!(?config, "Configuration resolved");

    let status = analyze(&config, file, &mut io::stdout().lock(), &mut io::stderr().lock())?;
    Ok(status.into())
}

/// Count tokens in `file`; the report goes to `out`, a read failure to `err`
fn analyze<O: Write, E: Write>(
    config: &Config,
    file: &Path,
    out: &mut O,
    err: &mut E,
) -> Result<AnalyzeStatus> {
    let mut session = config.session();
    match session.analyze(file) {
        SessionOutcome::Report(text) => {
            write_report(out, text)?;
            Ok(AnalyzeStatus::Success)
        }
        SessionOutcome::Failed(message) => {
            writeln!(err, "{}", message.red()).context("Failed to write error message")?;
            Ok(AnalyzeStatus::ReadFailure)
        }
        SessionOutcome::Idle => Ok(AnalyzeStatus::Success),
    }
}

fn write_report<W: Write>(out: &mut W, text: &str) -> Result<()> {
    let written = out.write_all(text.as_bytes()).and_then(|_| out.flush());

    match written {
        // Reader went away (e.g. `| head`); nothing left to report.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("Failed to write report"),
    }
}

/// Generate configuration file
fn generate_config(output: &Path, config_path: Option<&Path>, args: &ReportArgs) -> Result<ExitCode> {
    let config = load_config(config_path, args)?;

    config
        .save_to_file(output)
        .with_context(|| format!("Failed to save configuration file {:?}", output))?;

    println!(
        "{}",
        format!("✅ Configuration written to {}", output.display()).green()
    );
    Ok(ExitCode::SUCCESS)
}

/// Load configuration, apply command-line overrides and validate
fn load_config(path: Option<&Path>, args: &ReportArgs) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load configuration file {:?}", path))?,
        None => Config::load_or_default(DEFAULT_CONFIG_FILE)
            .with_context(|| format!("Failed to load configuration file {}", DEFAULT_CONFIG_FILE))?,
    };

    apply_overrides(&mut config, args);

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

fn apply_overrides(config: &mut Config, args: &ReportArgs) {
    if let Some(format) = args.format {
        config.report.format = format.into();
    }
    if let Some(top) = args.top {
        config.report.limit = Some(top);
    }
    if let Some(min_count) = args.min_count {
        config.report.min_count = min_count;
    }
    if let Some(order) = args.order {
        config.report.order = order.into();
    }
    if args.ascii {
        config.analysis.whitespace = WhitespaceMode::Ascii;
    }
    if args.strict_utf8 {
        config.analysis.strict_utf8 = true;
    }
    match args.verbose {
        0 => {}
        1 => config.logging.level = "info".to_string(),
        _ => config.logging.level = "debug".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_bare_file() {
        let cli = Cli::try_parse_from(["wordfreq", "notes.txt"]).unwrap();

        assert_eq!(cli.file, Some(PathBuf::from("notes.txt")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_analyze_with_overrides() {
        let cli = Cli::try_parse_from([
            "wordfreq", "analyze", "notes.txt", "--format", "json", "-n", "5", "--order",
            "first-seen", "--ascii",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Analyze { ref file }) => assert_eq!(file, &PathBuf::from("notes.txt")),
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.report.format, Some(FormatArg::Json));
        assert_eq!(cli.report.top, Some(5));
        assert_eq!(cli.report.order, Some(OrderArg::FirstSeen));
        assert!(cli.report.ascii);
    }

    #[test]
    fn test_parse_generate_config_default_output() {
        let cli = Cli::try_parse_from(["wordfreq", "generate-config"]).unwrap();

        match cli.command {
            Some(Commands::GenerateConfig { output }) => {
                assert_eq!(output, PathBuf::from(DEFAULT_CONFIG_FILE))
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["wordfreq", "a.txt", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = Config::default();
        let args = ReportArgs {
            format: Some(FormatArg::Json),
            top: Some(3),
            min_count: Some(2),
            order: Some(OrderArg::FirstSeen),
            ascii: true,
            strict_utf8: true,
            verbose: 2,
        };

        apply_overrides(&mut config, &args);

        assert_eq!(config.report.format, ReportFormat::Json);
        assert_eq!(config.report.limit, Some(3));
        assert_eq!(config.report.min_count, 2);
        assert_eq!(config.report.order, SortOrder::CountThenFirstSeen);
        assert_eq!(config.analysis.whitespace, WhitespaceMode::Ascii);
        assert!(config.analysis.strict_utf8);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = Config::default();
        apply_overrides(&mut config, &ReportArgs::default());

        assert_eq!(config, Config::default());
    }

    // ===== analyze Tests =====

    #[test]
    fn test_analyze_success_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "a a b").unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let status = analyze(&Config::default(), &path, &mut out, &mut err).unwrap();

        assert_eq!(status, AnalyzeStatus::Success);
        assert_eq!(String::from_utf8(out).unwrap(), "a: 2\nb: 1\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_analyze_missing_file_fails_without_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let status = analyze(&Config::default(), &path, &mut out, &mut err).unwrap();

        assert_eq!(status, AnalyzeStatus::ReadFailure);
        assert!(out.is_empty());
        let message = String::from_utf8(err).unwrap();
        assert!(message.contains("An error occurred while reading the file: "));
        assert!(message.contains("missing.txt"));
    }

    #[test]
    fn test_analyze_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let status = analyze(&Config::default(), dir.path(), &mut out, &mut err).unwrap();

        assert_eq!(status, AnalyzeStatus::ReadFailure);
        assert!(out.is_empty());
        assert!(!err.is_empty());
    }

    #[test]
    fn test_analyze_respects_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "x y y z z z").unwrap();
        let mut config = Config::default();
        config.report.limit = Some(1);
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let status = analyze(&config, &path, &mut out, &mut err).unwrap();

        assert_eq!(status, AnalyzeStatus::Success);
        assert_eq!(String::from_utf8(out).unwrap(), "z: 3\n");
    }

    #[test]
    fn test_zero_top_fails_validation() {
        let args = ReportArgs {
            top: Some(0),
            ..Default::default()
        };

        let result = load_config(Some(Path::new("/no/such/wordfreq.toml")), &args);
        assert!(result.is_err());

        let mut config = Config::default();
        apply_overrides(&mut config, &args);
        assert!(config.validate().is_err());
    }
}
