use clap::Parser;
use std::process;

use corfu_profiler::ProfilerError;
use corfu_profiler::config::ProfilerConfig;
use corfu_profiler::styling::{ERROR_EMOJI, eprintln};

mod cli;
mod commands;

use cli::{Cli, Commands, ConfigCommand};
use commands::{PlotOverrides, handle_config_show, handle_plot, handle_summary, handle_trace};

/// Single-letter name for the current thread (a-z, then A-Z), so rayon
/// workers are distinguishable in interleaved logs.
fn thread_letter() -> char {
    let thread_id = format!("{:?}", std::thread::current().id());
    thread_id
        .strip_prefix("ThreadId(")
        .and_then(|s| s.strip_suffix(")"))
        .and_then(|s| s.parse::<usize>().ok())
        .map(|n| match n {
            1..=26 => char::from(b'a' + (n - 1) as u8),
            27..=52 => char::from(b'A' + (n - 27) as u8),
            _ => '?',
        })
        .unwrap_or('?')
}

fn init_logging(verbose: bool) {
    // -v turns on debug logging; RUST_LOG overrides either way
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "off" }),
    )
    .format(|buf, record| {
        use anstyle::{AnsiColor, Color, Style};
        use std::io::Write;

        let dim = Style::new().dimmed();
        let thread = thread_letter();
        match record.level() {
            log::Level::Error | log::Level::Warn => {
                let yellow = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
                writeln!(buf, "{dim}[{thread}]{dim:#} {yellow}{}{yellow:#}", record.args())
            }
            _ => writeln!(buf, "{dim}[{thread}]{dim:#} {}", record.args()),
        }
    })
    .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ProfilerConfig::load(cli.config.as_deref()).map_err(|e| {
        ProfilerError::InvalidConfig {
            message: e.to_string(),
        }
    })?;
    log::debug!("Effective config: {config:?}");

    match cli.command {
        Commands::Plot {
            input,
            output_dir,
            charts,
            table_id,
            access_ops,
            mutate_ops,
        } => handle_plot(
            input.input.as_deref(),
            charts,
            PlotOverrides {
                output_dir,
                table_id,
                access_ops,
                mutate_ops,
            },
            &config,
        ),
        Commands::Summary { input } => handle_summary(input.input.as_deref(), &config),
        Commands::Trace { input } => handle_trace(input.input.as_deref(), &config),
        Commands::Config(ConfigCommand::Show) => {
            handle_config_show(cli.config.as_deref(), &config)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        // Domain errors carry their own emoji and colors
        if let Some(profiler_err) = e.downcast_ref::<ProfilerError>() {
            eprintln!("{profiler_err}");
        } else {
            let msg = format!("{e:#}");
            eprintln!("{}", color_print::cformat!("{ERROR_EMOJI} <red>{msg}</>"));
        }
        process::exit(1);
    }
}
