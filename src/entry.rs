use std::ffi::OsString;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::{print_summary, run_local};
use crate::args::{CannonArgs, normalize_single_dash_flags};
use crate::domain::run::RunConfig;
use crate::error::AppResult;
use crate::shutdown_handlers::os_interrupt;

/// Parses the command line, resolves the run, dispatches it, and prints the
/// summary. Without a target URL this prints usage and returns `Ok`.
///
/// # Errors
///
/// Returns an error when configuration cannot be resolved (including an
/// unreadable `@file` body) or the runtime cannot start. Nothing is sent in
/// either case.
pub fn run() -> AppResult<()> {
    let raw_args: Vec<OsString> = std::env::args_os().collect();
    run_with_args(raw_args)
}

fn run_with_args(raw_args: Vec<OsString>) -> AppResult<()> {
    let (mut args, matches) = parse_args(raw_args)?;

    crate::logger::init_logging(args.verbose, args.no_color);

    apply_config(&mut args, &matches)?;

    if args.url.is_none() {
        CannonArgs::command().print_help()?;
        println!();
        return Ok(());
    }

    let config = match RunConfig::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{}", err);
            return Err(err);
        }
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(run_local(config, os_interrupt()))?;

    print_summary(&outcome.counters);
    Ok(())
}

fn parse_args(raw_args: Vec<OsString>) -> AppResult<(CannonArgs, ArgMatches)> {
    let cmd = CannonArgs::command();
    let matches = cmd.get_matches_from(normalize_single_dash_flags(raw_args));
    let args = CannonArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn apply_config(args: &mut CannonArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(args, matches, &config)?;
    }
    Ok(())
}
