use std::process::ExitCode;

use clap::Parser;

use loadshift_cli::{Cli, Verdict, read_input, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    loadshift_observability::init(cli.log_format);

    let outcome = read_input(cli.command.input())
        .and_then(|raw| run(&cli, &raw, &mut std::io::stdout().lock()));

    match outcome {
        Ok(verdict) => {
            tracing::info!(?verdict, code = verdict.exit_code(), "relocation run finished");
            ExitCode::from(verdict.exit_code())
        }
        Err(err) => {
            tracing::error!("relocation run failed: {err:#}");
            eprintln!("error: {err:#}");
            ExitCode::from(Verdict::FAILURE_CODE)
        }
    }
}
