use std::path::PathBuf;
use std::process;

use autotagger::config::{Config, ExitCodes, ENV_HELP};
use autotagger::logger;
use autotagger::release::{self, Outcome};
use env_logger::{Builder, Env};
use structopt::clap::ErrorKind;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(
    name = env!("CARGO_PKG_NAME"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION"),
    after_help = ENV_HELP
)]
struct Opt {
    #[structopt(
        long = "event-path",
        parse(from_os_str),
        help = "Read the pull request event from this file instead of GITHUB_EVENT_PATH"
    )]
    event_path: Option<PathBuf>,

    #[structopt(long, help = "Compute the next tag without creating it")]
    dry_run: bool,

    #[structopt(short, long, help = "Only log errors")]
    quiet: bool,

    #[structopt(short, long, help = "Log every ref and API call")]
    verbose: bool,
}

fn main() {
    // Read before anything can fail so NEVER_FAIL covers every exit below.
    let exit_codes = ExitCodes::from_env();

    let opt = match Opt::from_iter_safe(std::env::args_os()) {
        Ok(opt) => opt,
        Err(e) if matches!(e.kind, ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed) => {
            e.exit()
        }
        Err(e) => {
            eprintln!("{}", e.message);
            process::exit(exit_codes.fatal);
        }
    };

    let level = if opt.quiet {
        "error"
    } else if opt.verbose {
        "debug"
    } else {
        "info"
    };
    Builder::from_env(Env::default().default_filter_or(level)).init();

    let result = Config::from_env()
        .and_then(|config| release::run(&config, opt.event_path.as_deref(), opt.dry_run));

    let code = match result {
        Ok(Outcome::Tagged { .. }) | Ok(Outcome::DryRun { .. }) => 0,
        Ok(Outcome::Skipped(reason)) => {
            logger::skipped(&reason.to_string());
            exit_codes.no_op
        }
        Err(e) => {
            logger::error(&e.to_string());
            exit_codes.fatal
        }
    };

    process::exit(code);
}
