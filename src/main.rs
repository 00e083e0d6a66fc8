// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use once_cell::sync::OnceCell;
use std::io::Write;
use std::path::{Path, PathBuf};

use discourse_inject::app_config::{self, Config};
use discourse_inject::app_controller::Controller;
use discourse_inject::corpus::CorpusLayout;
use discourse_inject::file_utils::FileManager;
use discourse_inject::injection::ErrorSelection;

/// CLI Wrapper for ErrorSelection to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliErrorKind {
    All,
    Structural,
    Lexical,
    Connective,
}

impl From<CliErrorKind> for ErrorSelection {
    fn from(cli_kind: CliErrorKind) -> Self {
        match cli_kind {
            CliErrorKind::All => ErrorSelection::All,
            CliErrorKind::Structural => ErrorSelection::Structural,
            CliErrorKind::Lexical => ErrorSelection::Lexical,
            CliErrorKind::Connective => ErrorSelection::Connective,
        }
    }
}

/// CLI Wrapper for CorpusLayout to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLayout {
    Auto,
    Directory,
    Doctext,
}

impl From<CliLayout> for CorpusLayout {
    fn from(cli_layout: CliLayout) -> Self {
        match cli_layout {
            CliLayout::Auto => CorpusLayout::Auto,
            CliLayout::Directory => CorpusLayout::Directory,
            CliLayout::Doctext => CorpusLayout::Doctext,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Inject discourse errors into a post-edited corpus
    Inject(InjectArgs),

    /// Generate shell completions for discourse-inject
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct InjectArgs {
    /// Corpus directory containing pe/ and mt/
    #[arg(value_name = "DIRECTORY")]
    directory: Option<PathBuf>,

    /// Plain output file (the annotated copy goes to <OUTPUT>.tagged)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Post-edited corpus (directory or doctext file)
    #[arg(long)]
    pe: Option<PathBuf>,

    /// Machine-translated corpus (directory or doctext file)
    #[arg(long)]
    mt: Option<PathBuf>,

    /// Corpus layout
    #[arg(long, value_enum)]
    layout: Option<CliLayout>,

    /// Directory holding lexical_errors_json and connective_errors_json
    #[arg(long = "errors", value_name = "DIR")]
    errors_dir: Option<PathBuf>,

    /// Lexical error catalogue
    #[arg(long)]
    lexical: Option<PathBuf>,

    /// Connective error catalogue
    #[arg(long)]
    connective: Option<PathBuf>,

    /// Structural error catalogue
    #[arg(long)]
    structural: Option<PathBuf>,

    /// MT-PE word alignments
    #[arg(long)]
    alignments: Option<PathBuf>,

    /// Error kinds to inject
    #[arg(long, value_enum)]
    kind: Option<CliErrorKind>,

    /// POS lexicon (word<TAB>TAG per line), overrides the model
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// nlprule tokenizer model used for POS tags
    #[arg(long)]
    tagger_model: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, default_value = "inject.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Shorthand for --log-level debug
    #[arg(short, long)]
    verbose: bool,

    /// Also append log lines to this file
    #[arg(long)]
    logfile: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,
}

impl InjectArgs {
    fn cli_log_level(&self) -> Option<app_config::LogLevel> {
        if self.verbose {
            return Some(app_config::LogLevel::Debug);
        }
        self.log_level.clone().map(Into::into)
    }

    // @applies: CLI values over config values
    fn apply_to(&self, config: &mut Config) {
        // A positional corpus directory replaces configured corpus paths
        if let Some(directory) = &self.directory {
            config.inputs.pe = None;
            config.inputs.mt = None;
            config.inputs = config.inputs.clone().with_corpus_dir(directory);
        }

        let inputs = &mut config.inputs;
        if self.pe.is_some() {
            inputs.pe = self.pe.clone();
        }
        if self.mt.is_some() {
            inputs.mt = self.mt.clone();
        }
        if self.errors_dir.is_some() {
            inputs.errors_dir = self.errors_dir.clone();
        }
        if self.lexical.is_some() {
            inputs.lexical = self.lexical.clone();
        }
        if self.connective.is_some() {
            inputs.connective = self.connective.clone();
        }
        if self.structural.is_some() {
            inputs.structural = self.structural.clone();
        }
        if self.alignments.is_some() {
            inputs.alignments = self.alignments.clone();
        }
        if self.output.is_some() {
            config.output = self.output.clone();
        }
        if let Some(layout) = &self.layout {
            config.corpus.layout = layout.clone().into();
        }
        if let Some(kind) = &self.kind {
            config.error_kind = kind.clone().into();
        }
        if self.lexicon.is_some() {
            config.tagger.lexicon = self.lexicon.clone();
        }
        if self.tagger_model.is_some() {
            config.tagger.model = self.tagger_model.clone();
        }
        if let Some(level) = self.cli_log_level() {
            config.log_level = level;
        }
        if self.logfile.is_some() {
            config.log_file = self.logfile.clone();
        }
    }
}

/// discourse-inject - reinject discourse errors into post-edited MT
///
/// Reverts post-editor corrections recorded in structural, lexical and
/// connective error catalogues, producing a plain corpus and an annotated copy.
#[derive(Parser, Debug)]
#[command(name = "discourse-inject")]
#[command(version = "0.1.0")]
#[command(about = "Discourse error injection for MT/PE corpora")]
#[command(long_about = "discourse-inject rebuilds a post-edited corpus with the discourse errors of its MT source.

EXAMPLES:
    discourse-inject inject corpus/ --errors errors/ --alignments align.json -o out.txt
    discourse-inject inject --pe pe.txt --mt mt.txt --structural structural.json -o out.txt
    discourse-inject inject corpus/ --kind connective --connective conn.json --alignments align.json -o out.txt
    discourse-inject completions bash > discourse-inject.bash

CONFIGURATION:
    Configuration is stored in inject.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. Command-line options override config values.

OUTPUT:
    <OUTPUT>         plain injected corpus
    <OUTPUT>.tagged  same corpus with <error type=.. edit=.. item=..> markup")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// File that receives a copy of every log line, set once the config is known
static LOG_FILE: OnceCell<PathBuf> = OnceCell::new();

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        let mut stderr = std::io::stderr();
        let _ = writeln!(
            stderr,
            "{}{} {:5} {}\x1B[0m",
            Self::get_color_for_level(record.level()),
            now,
            record.level(),
            record.args()
        );

        if let Some(path) = LOG_FILE.get() {
            let _ = FileManager::append_to_log_file(path, &format!("{} {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    // Accept every level; the effective level is set through log::set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "discourse-inject", &mut std::io::stdout());
            Ok(())
        }
        Commands::Inject(args) => run_inject(args),
    }
}

fn run_inject(options: InjectArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(level) = options.cli_log_level() {
        log::set_max_level(level_filter(&level));
    }

    let mut config = load_or_create_config(&options.config_path)?;
    options.apply_to(&mut config);

    if let Some(log_file) = &config.log_file {
        let _ = LOG_FILE.set(log_file.clone());
    }
    log::set_max_level(level_filter(&config.log_level));

    let controller = Controller::with_config(config)?;
    match controller.run(options.force_overwrite)? {
        Some(report) => info!("{}", report.summary()),
        None => info!("Nothing written"),
    }

    Ok(())
}

// @loads: Config file, creating a default one when absent
fn load_or_create_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        return Config::from_file(config_path);
    }

    warn!("Config file not found at '{}', creating default config.", config_path);
    let config = Config::default();
    config
        .save(config_path)
        .with_context(|| format!("Failed to write default config to file: {}", config_path))?;
    Ok(config)
}
