use minionsuite::cli::{parse_args, run_cli};
use minionsuite::logging::{init_logging, LogConfig};

fn main() {
    let cli = match parse_args(std::env::args()) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    if let Err(err) = init_logging(&LogConfig::from_env().verbose(cli.verbose)) {
        eprintln!("Warning: {err:#}");
    }

    if let Err(err) = run_cli(&cli) {
        tracing::error!(error = %format!("{err:#}"), "minionsuite failed");
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
