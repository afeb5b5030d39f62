use clap::Parser;
use labelkit::cli::{run, Args};
use labelkit::init_logging;

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.debug) {
        eprintln!("Warning: logging unavailable: {}", e);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
