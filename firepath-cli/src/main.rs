//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("firepath: failed to install logger: {err}");
    }
    if let Err(err) = firepath_cli::run() {
        eprintln!("firepath: {err}");
        std::process::exit(1);
    }
}
