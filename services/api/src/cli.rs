use crate::demo::{run_demo, run_jobs, run_screen, DemoArgs, JobsArgs, ScreenArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use screening_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Candidate Screening Service",
    about = "Score, shortlist and rank candidates from the command line or over HTTP",
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
    /// Screen a batch of resumes described in a JSON file
    Screen(ScreenArgs),
    /// Preview category and threshold for each posting in a job CSV export
    Jobs(JobsArgs),
    /// Run an end-to-end screening demo on built-in sample data
    Demo(DemoArgs),
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
        Command::Screen(args) => run_screen(args),
        Command::Jobs(args) => run_jobs(args),
        Command::Demo(args) => run_demo(args),
    }
}
