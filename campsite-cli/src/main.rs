//! Entry point for the `campsite-poi` command-line interface.
#![forbid(unsafe_code)]

use log::error;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = campsite_cli::run() {
        error!("{err}");
        std::process::exit(1);
    }
}
