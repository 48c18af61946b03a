//! `klimakur` command-line entry point

use klimakur_cli::{build_cli, run};
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = build_cli().get_matches();

    let filter = if matches.get_flag("verbose") {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let stdout = std::io::stdout();
    if let Err(e) = run(&matches, &mut stdout.lock()) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
