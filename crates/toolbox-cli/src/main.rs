//! Developer toolbox CLI.

use std::io::{self, IsTerminal};
use std::sync::Arc;

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use toolbox_cli::commands::{
    PanelInput, list_table, panel_table, panel_view, qr_decode, qr_encode, read_input, run_tool,
};
use toolbox_cli::logging::{LogConfig, LogFormat, init_logging};
use toolbox_cli::render::TerminalRenderer;
use toolbox_core::ToolRegistry;
use toolbox_model::Mode;

mod cli;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, PanelArgs, QrCommand, RunArgs};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let registry = match ToolRegistry::builtin() {
        Ok(registry) => Arc::new(registry),
        Err(error) => {
            tracing::error!(%error, "invalid tool catalog");
            eprintln!("error: {error}");
            std::process::exit(2);
        }
    };
    let exit_code = match run(cli.command, registry).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

async fn run(command: Command, registry: Arc<ToolRegistry>) -> anyhow::Result<i32> {
    match command {
        Command::List => {
            println!("{}", list_table(&registry));
            Ok(0)
        }
        Command::Run(RunArgs {
            tool,
            decode,
            input,
        }) => {
            let text = read_input(input.as_deref())?;
            let mode = if decode { Mode::Decode } else { Mode::Encode };
            let mut renderer = TerminalRenderer::new(io::stdout(), io::stderr());
            run_tool(registry, &tool, text, mode, &mut renderer).await?;
            Ok(i32::from(renderer.failed()))
        }
        Command::Panel(PanelArgs {
            tool,
            value,
            file,
            preview,
        }) => {
            let input = match (file, value) {
                (Some(path), _) => PanelInput::File(path),
                (None, value) => PanelInput::Value(value.unwrap_or_default()),
            };
            let view = panel_view(&registry, &tool, &input)?;
            println!("{}", panel_table(&view));
            if let (true, Some(preview)) = (preview, &view.preview) {
                println!("{preview}");
            }
            Ok(0)
        }
        Command::Qr(QrCommand::Encode(args)) => {
            let options = args.options();
            if let Some(data_url) = qr_encode(args.text, options, args.output.as_deref()).await? {
                println!("{data_url}");
            }
            Ok(0)
        }
        Command::Qr(QrCommand::Decode { file }) => {
            let decoded = qr_decode(&file).await?;
            println!("{}", decoded.text);
            Ok(0)
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
