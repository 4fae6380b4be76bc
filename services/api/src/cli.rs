use crate::demo::{run_demo, run_report_listing, DemoArgs, ReportListArgs};
use crate::server;
use civic_reports::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Civic Reports",
    about = "Serve and browse community issue reports from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Browse the report listing without starting the server
    Reports {
        #[command(subcommand)]
        command: ReportsCommand,
    },
    /// Submit a sample report and print the resulting listing and statistics
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ReportsCommand {
    /// Print one page of the filtered and sorted report listing
    List(ReportListArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Reports {
            command: ReportsCommand::List(args),
        } => run_report_listing(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
