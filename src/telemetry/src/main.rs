use nr_lambda_telemetry::cli;

pub fn main() -> anyhow::Result<()> {
    cli::process_command()
}
