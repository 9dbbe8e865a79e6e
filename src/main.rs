use clap::Parser;
use env_logger::Env;
use splice_junctions::cli::Args;
use splice_junctions::{pipeline, JunctionError};

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level()))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let result = args
        .run_options()
        .map_err(anyhow::Error::from)
        .and_then(|options| pipeline::run(&options));

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        let code = e.downcast_ref::<JunctionError>().map_or(1, JunctionError::exit_code);
        std::process::exit(code);
    }
}
