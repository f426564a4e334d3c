mod args;
mod colors;
mod command;
mod commands;
mod config;
mod download;
mod extract;
mod home;
mod phpini;
mod snapshot;
mod store;
mod terminal;
mod util;

use crate::args::Args;
use crate::colors::*;
use crate::command::Command;
use crate::config::Config;
use crate::download::HttpFetcher;
use crate::extract::SevenZip;
use crate::home::Home;
use anyhow::anyhow;
use clap::Parser;
use clap::error::ErrorKind;
use tracing::{level_filters::*, *};
use tracing_subscriber::EnvFilter;

// Exit code used in case there were no errors.
#[doc(hidden)]
const EXIT_OK: i32 = 0;

// Exit code used in case of errors.
#[doc(hidden)]
const EXIT_NOK: i32 = 1;

/// Main entry point for the application.
fn main() {
    // enable ansi support to use colorised/styled output
    #[cfg(windows)]
    let _ = nu_ansi_term::enable_ansi_support();

    // delegate
    if let Err(err) = internal_main() {
        terminal::error(format!("{err:#}"));
        std::process::exit(EXIT_NOK);
    } else {
        std::process::exit(EXIT_OK);
    }
}

// Internal main entry point for the application.
#[doc(hidden)]
fn internal_main() -> anyhow::Result<()> {
    // parse arguments
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print()?;
            return Ok(());
        }
        Err(err) => return Err(anyhow!("{}", usage_error(&err))),
    };

    // print some information
    if !args.quiet || args.version {
        print_info();
    }

    // stop here in case only the version was requested
    if args.version {
        return Ok(());
    }

    // init tracing
    init_tracing(&args);

    // print parsed arguments
    trace!("arguments: {args:#?}");

    let command = Command::parse(&args.words())?;
    debug!(%command);

    let home = Home::resolve(args.home.as_deref())?;
    debug!(home = %home.dir().display());

    run(&home, &args, command)
}

// Runs the given command.
#[doc(hidden)]
fn run(home: &Home, args: &Args, command: Command) -> anyhow::Result<()> {
    // configuration is read only by the commands that need it
    let load_config = || -> anyhow::Result<Config> {
        let config = Config::load_from_file(home.config_file())?;
        debug!(?config);
        Ok(config)
    };

    // help and unknown commands never read config.json
    match command {
        Command::Help => println!("{}", commands::USAGE),
        Command::Setup => {
            commands::setup(home)?;
        }
        Command::Info => println!("{}", commands::info(home, &load_config()?)?),
        Command::List => println!("{}", commands::list(&load_config()?)),
        Command::Download(version) => {
            let config = load_config()?;
            let fetcher = HttpFetcher::new();
            let extractor = SevenZip::new(&args.seven_zip);
            commands::download(home, &config, &version, &fetcher, &extractor)?;
        }
        Command::Load(version) => commands::load(&load_config()?, &version)?,
        Command::Xampp(path) => {
            commands::set_xampp(home, &load_config()?, &path)?;
        }
        Command::Phps(path) => {
            commands::set_phps(home, &load_config()?, &path)?;
        }
        Command::Unknown(name) => println!("Command {name} is not found! see peach help."),
    }

    Ok(())
}

// Returns the message of a clap error without its `error: ` prefix.
#[doc(hidden)]
fn usage_error(err: &clap::Error) -> String {
    let message = err.render().to_string();
    let message = message.trim_end();
    message.strip_prefix("error: ").unwrap_or(message).to_string()
}

// Prints some information (version, path of executable, etc.).
#[doc(hidden)]
fn print_info() {
    let pkg_name = env!("CARGO_PKG_NAME");
    let pkg_version = env!("CARGO_PKG_VERSION");
    let git_describe = env!("VERGEN_GIT_DESCRIBE");
    let rustc_semver = env!("VERGEN_RUSTC_SEMVER");
    let version = format!("{pkg_name} {pkg_version} (git/{git_describe}) (rustc/{rustc_semver})");
    if let Ok(exe) = std::env::current_exe() {
        let exe = PATH_COLOR.paint(exe.to_string_lossy());
        println!("{version} [{exe}]");
    } else {
        println!("{version}");
    }
}

// Initialises the tracing framework based on given command line arguments.
#[doc(hidden)]
fn init_tracing(args: &Args) {
    // We are falling back to printing errors only if the RUST_LOG environment variable has not been set.
    let level_filter = match args.verbose {
        0 => LevelFilter::ERROR.into(),
        1 => LevelFilter::WARN.into(),
        2 => LevelFilter::INFO.into(),
        3 => LevelFilter::DEBUG.into(),
        _ => LevelFilter::TRACE.into(),
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level_filter);
    tracing_subscriber::fmt().with_env_filter(env_filter).with_writer(std::io::stderr).init();
}
