use clap::builder::styling::{AnsiColor, Color, Styles};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use corfu_profiler::render::ChartKind;

/// Help output colors
fn help_styles() -> Styles {
    let green = anstyle::Style::new()
        .bold()
        .fg_color(Some(Color::Ansi(AnsiColor::Green)));
    Styles::styled()
        .header(green)
        .usage(green)
        .literal(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .placeholder(anstyle::Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .error(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
        .valid(green)
        .invalid(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Yellow))),
        )
}

#[derive(Parser)]
#[command(name = "corfu-profiler")]
#[command(about = "Charts and summaries for CorfuDB profiler logs", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
#[command(styles = help_styles())]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Show debug logging (files read, lines skipped, charts written)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Config file to use instead of the user config
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to read profiler lines from.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Log file, directory of log files, or `-` for stdin
    ///
    /// Falls back to `input` from the config file.
    pub input: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Draw PNG charts from a profiler log
    #[command(after_long_help = "\
Writes every chart by default. Per-table charts (table-id-ops-per-tx,
all-methods-by-id) need --table-id and are skipped without one.

Examples:
  corfu-profiler plot data/ -o results
  corfu-profiler plot run.log --chart all-ops --chart op-latency
  corfu-profiler plot run.log --table-id 7c4f2940-7893-3334-a6cb-7a87bf045c0d")]
    Plot {
        #[command(flatten)]
        input: InputArgs,

        /// Directory for the PNG files [default: results]
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Chart to draw (repeatable; default: all)
        #[arg(long = "chart", value_enum, value_name = "CHART")]
        charts: Vec<ChartKind>,

        /// Table the per-table charts break down
        #[arg(long)]
        table_id: Option<String>,

        /// Method counted as an access (repeatable; replaces the config list)
        #[arg(long = "access-op", value_name = "METHOD")]
        access_ops: Vec<String>,

        /// Method counted as a mutation (repeatable; replaces the config list)
        #[arg(long = "mutate-op", value_name = "METHOD")]
        mutate_ops: Vec<String>,
    },

    /// Print per-event counts and latencies
    Summary {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Convert a profiler log to Chrome Trace Event Format JSON
    #[command(after_long_help = "\
Open the output in chrome://tracing or https://ui.perfetto.dev.

Example:
  corfu-profiler trace run.log > trace.json")]
    Trace {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_plot_charts() {
        let cli = Cli::try_parse_from([
            "corfu-profiler",
            "plot",
            "run.log",
            "--chart",
            "all-ops",
            "--chart",
            "op-latency",
            "--access-op",
            "get",
        ])
        .unwrap();
        let Commands::Plot {
            input,
            charts,
            access_ops,
            ..
        } = cli.command
        else {
            panic!("expected plot");
        };
        assert_eq!(input.input, Some(PathBuf::from("run.log")));
        assert_eq!(charts, vec![ChartKind::AllOps, ChartKind::OpLatency]);
        assert_eq!(access_ops, vec!["get"]);
    }

    #[test]
    fn test_unknown_chart_rejected() {
        assert!(Cli::try_parse_from(["corfu-profiler", "plot", "--chart", "nope"]).is_err());
    }
}
