// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info};
use std::io::{IsTerminal, Write};

use wikireel::app_config::{self, Config};
use wikireel::app_controller::{ContentRequest, Controller};
use wikireel::content::{Content, Prefix};
use wikireel::prompt::{LinePrompt, Prompt, TerminalPrompt};

/// CLI Wrapper for Prefix to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliPrefix {
    /// "Quem e"
    WhoIs,
    /// "O que e"
    WhatIs,
    /// "A historia de"
    HistoryOf,
}

impl From<CliPrefix> for Prefix {
    fn from(cli_prefix: CliPrefix) -> Self {
        match cli_prefix {
            CliPrefix::WhoIs => Prefix::WhoIs,
            CliPrefix::WhatIs => Prefix::WhatIs,
            CliPrefix::HistoryOf => Prefix::HistoryOf,
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
    /// Fetch and annotate an article, then save it (default command)
    Text(ContentArgs),

    /// Render the video from the saved content document
    Video,

    /// Run the text stage and the video stage back to back
    Run(ContentArgs),

    /// Generate shell completions for wikireel
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Answers that would otherwise be asked interactively
#[derive(Args, Debug, Default)]
struct ContentArgs {
    /// Wikipedia search term
    #[arg(short, long)]
    search_term: Option<String>,

    /// Phrasing prefix shown before the search term
    #[arg(short, long, value_enum)]
    prefix: Option<CliPrefix>,

    /// Wikipedia language code (e.g., 'pt', 'en')
    #[arg(long)]
    lang: Option<String>,

    /// Maximum number of sentences kept from the article
    #[arg(short, long)]
    max_sentences: Option<usize>,
}

impl From<ContentArgs> for ContentRequest {
    fn from(args: ContentArgs) -> Self {
        ContentRequest {
            search_term: args.search_term,
            prefix: args.prefix.map(Into::into),
            lang: args.lang,
            maximum_sentences: args.max_sentences,
        }
    }
}

/// wikireel - narrated videos from Wikipedia articles
#[derive(Parser, Debug)]
#[command(name = "wikireel")]
#[command(version)]
#[command(about = "Turn a Wikipedia topic into a narrated video")]
#[command(long_about = "wikireel fetches a Wikipedia article, condenses it into a few keyword-annotated
sentences, and renders them into a video with ImageMagick and After Effects.

EXAMPLES:
    wikireel                                     # Ask for a topic, run the text stage
    wikireel text -s \"Ayrton Senna\" -p who-is    # Text stage without prompts
    wikireel video                               # Render the saved content document
    wikireel run -s Brasil -p history-of -m 5    # Both stages in one go
    wikireel completions bash > wikireel.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created automatically. API keys are read from the files
    under credentials/.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
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

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
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

#[tokio::main]
async fn main() -> Result<()> {
    // Start at info and the config or the command line refine it below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    let command = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "wikireel", &mut std::io::stdout());
            return Ok(());
        }
        Some(command) => command,
        None => Commands::Text(ContentArgs::default()),
    };

    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    log::set_max_level(level_filter(&config.log_level));

    let controller = Controller::with_config(config)?;

    let content = match command {
        Commands::Text(args) => match start_content(&controller, args)? {
            Some(content) => controller.run_text(content).await?,
            None => return Ok(()),
        },
        Commands::Run(args) => match start_content(&controller, args)? {
            Some(content) => controller.run_all(content).await?,
            None => return Ok(()),
        },
        Commands::Video => controller.run_video().await?,
        Commands::Completions { .. } => return Ok(()),
    };

    let json = serde_json::to_string_pretty(&content).context("Failed to serialize content document")?;
    println!("{}", json);
    info!("Done with '{}'", content.title());
    Ok(())
}

fn start_content(controller: &Controller, args: ContentArgs) -> Result<Option<Content>> {
    let request = ContentRequest::from(args);
    let mut prompt: Box<dyn Prompt> = if std::io::stdin().is_terminal() {
        Box::new(TerminalPrompt::default())
    } else {
        Box::new(LinePrompt::new(std::io::stdin().lock(), std::io::stderr()))
    };
    controller.start_content(request, prompt.as_mut())
}
