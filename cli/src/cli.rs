//! # The forecast command line interface.
//!
//! The CLI is built with the `clap` builder API. Each subcommand lives in its own module
//! with a `command` function that defines the arguments and an `execute` function that
//! runs it. Forecasts are read from provider payload files and reports are written to
//! `stdout`, logging goes to `stderr` and optionally a log file.

use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};
use forecast_lib::prelude::{ActivityCatalog, Config, Normalizer};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use toolslib::logs;

mod commands;
use commands::Commands;

mod reports;

/// The command line interface result.
pub type Result<T> = std::result::Result<T, Error>;

/// The CLI error definition.
#[derive(Debug)]
pub struct Error(String);
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::from(error.as_str())
    }
}
impl From<&str> for Error {
    fn from(error: &str) -> Self {
        Error(format!("cli: {error}"))
    }
}
impl From<forecast_lib::Error> for Error {
    fn from(error: forecast_lib::Error) -> Self {
        Error(error.to_string())
    }
}
impl From<toolslib::Error> for Error {
    fn from(error: toolslib::Error) -> Self {
        Error(error.to_string())
    }
}

/// Create an error from [format!] compatible arguments.
///
macro_rules! err {
    ($($arg:tt)*) => {
        Err(crate::cli::Error::from(format!($($arg)*)))
    };
}
use err;

/// The command line definition.
///
pub fn command() -> Command {
    let binary_name = env!("CARGO_BIN_NAME");
    let version = env!("CARGO_PKG_VERSION");
    Command::new(binary_name)
        // boiler plate
        .about("Find the forecast days that suit an activity.")
        .version(version)
        .subcommand_required(true)
        .allow_external_subcommands(false)
        // show help if nothing is on the command line
        .arg_required_else_help(true)
        // the command arguments
        .args(CommandLineArgs::get())
        // the subcommands
        .subcommands(Commands::get())
}

/// This is a mainline helper that prepares the runtime environment and runs the command.
///
/// # Arguments
///
/// * `args` holds the arguments from the parsed command line.
pub fn initialize_and_run(args: ArgMatches) -> Result<()> {
    initialize(&args);
    log::trace!("initialize_and_run Enter");
    run(args)
}

/// Prepare the runtime environment
///
/// # Arguments
///
/// * `args` holds the arguments from the parsed command line.
fn initialize(args: &ArgMatches) {
    let cmd_args = CommandLineArgs::from(args);
    match logs::initialize(logs::LogProperties {
        level: logs::level_from_verbosity(cmd_args.verbosity()),
        logfile_path: cmd_args.logfile(),
        logfile_append: cmd_args.append(),
        file_loggers: vec!["forecast".to_string(), "forecast_lib".to_string(), "toolslib".to_string()],
    }) {
        Ok(_) => (),
        Err(log_error) => eprintln!("Error initializing logging!!! {:?}", log_error),
    };
}

/// Run the appropriate subcommand.
///
/// # Arguments
///
/// * `args` holds the arguments from the parsed command line.
fn run(mut args: ArgMatches) -> Result<()> {
    let (name, subcommand_args) = match args.remove_subcommand() {
        Some(subcommand) => subcommand,
        None => return err!("A command is required."),
    };
    let command_args = CommandLineArgs::from(&args);
    let config = Config::new(command_args.config_file())?;
    log::debug!("{:?}", config);
    let session = Session::new(config);
    Commands::run(&session, &name, subcommand_args)
}

/// The runtime state shared by the commands.
#[derive(Debug)]
pub struct Session {
    /// The application configuration.
    pub config: Config,
    /// Creates weather records from provider payloads.
    pub normalizer: Normalizer,
}
impl Session {
    /// Create the session from the application configuration.
    pub fn new(config: Config) -> Self {
        let normalizer = Normalizer::from(&config);
        Self { config, normalizer }
    }
    /// Load the activity catalog named in the configuration.
    pub fn activities(&self) -> Result<ActivityCatalog> {
        Ok(ActivityCatalog::load(&self.config.activities_path())?)
    }
}

/// A filename parser used by the CLI.
///
/// The parser is responsible for creating a `Path` from the string argument. The following
/// rudimentary checks are performed which may result in an error being returned.
///
/// * Check if the filename points to a directory.
/// * Check if the path (if present) exists.
///
/// # Arguments
///
/// * `filename` - the filename as entered on the command line.
///
pub fn parse_filename(filename: &str) -> std::result::Result<PathBuf, String> {
    if filename.is_empty() {
        return Err("The filename cannot be empty.".to_string());
    }
    let filepath = PathBuf::from(filename);
    if filepath.is_dir() {
        return Err(format!("{} is a directory...", filename));
    }
    // "bar.txt" and "foo/bar.txt" are both relative AND have parent paths, one is just empty
    match filepath.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            Err(format!("The parent directory of {} does not exist...", filename))
        }
        _ => Ok(filepath),
    }
}

/// A parser for arguments that name an existing file.
///
/// # Arguments
///
/// * `filename` - the filename as entered on the command line.
///
pub fn parse_existing_file(filename: &str) -> std::result::Result<PathBuf, String> {
    let filepath = parse_filename(filename)?;
    match filepath.is_file() {
        true => Ok(filepath),
        false => Err(format!("{} does not exist.", filename)),
    }
}

/// Read the contents of a provider payload file.
///
/// # Arguments
///
/// * `path` is the payload file.
///
fn read_payload(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(payload) => Ok(payload),
        Err(error) => err!("Could not read '{}' ({}).", path.display(), error),
    }
}

/// Write a report to `stdout`.
///
/// # Arguments
///
/// * `report` is the report content.
///
fn write_report(report: &str) -> Result<()> {
    let mut writer = io::stdout().lock();
    let result = match report.ends_with('\n') {
        true => writer.write_all(report.as_bytes()),
        false => writeln!(writer, "{}", report),
    };
    match result.and_then(|_| writer.flush()) {
        Ok(_) => Ok(()),
        Err(error) => err!("Error writing the report ({}).", error),
    }
}

/// The common command line arguments.
pub struct CommandLineArgs<'a>(
    /// The subcommand command line arguments.
    &'a ArgMatches,
);
impl<'a> CommandLineArgs<'a> {
    /// The config file argument id.
    const CONFIG_FILE: &'static str = "CONFIG_FILE";
    /// The log file argument id.
    const LOGFILE: &'static str = "LOGFILE";
    /// The append to log file argument id.
    const APPEND: &'static str = "APPEND_LOGFILE";
    /// The logging verbosity level argument id.
    const VERBOSITY: &'static str = "LOG_VERBOSITY";
    /// Get the common command line arguments.
    fn get() -> Vec<Arg> {
        vec![
            Arg::new(Self::CONFIG_FILE)
                .short('c')
                .long("config")
                .action(ArgAction::Set)
                .value_name("FILE")
                .value_parser(parse_filename)
                .help("The configuration file pathname (DEFAULT forecast.toml)."),
            Arg::new(Self::LOGFILE)
                .short('l')
                .long("logfile")
                .action(ArgAction::Set)
                .value_name("FILE")
                .value_parser(parse_filename)
                .help("The log filename (DEFAULT stderr)."),
            Arg::new(Self::APPEND)
                .short('a')
                .long("append")
                .requires(Self::LOGFILE)
                .action(ArgAction::SetTrue)
                .help("Append to the logfile, otherwise overwrite."),
            Arg::new(Self::VERBOSITY)
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Logging verbosity (once=INFO, twice=DEBUG, +twice=TRACE)"),
        ]
    }
    /// Get the configuration file argument.
    pub fn config_file(&self) -> Option<PathBuf> {
        self.0.get_one::<PathBuf>(Self::CONFIG_FILE).cloned()
    }
    /// Get the logfile name argument.
    pub fn logfile(&self) -> Option<PathBuf> {
        self.0.get_one::<PathBuf>(Self::LOGFILE).cloned()
    }
    /// Get the flag controlling if the logfile should be appended too.
    pub fn append(&self) -> bool {
        self.0.get_flag(Self::APPEND)
    }
    /// Get the logging verbosity flag.
    pub fn verbosity(&self) -> u8 {
        std::cmp::min(self.0.get_one::<u8>(Self::VERBOSITY).map_or(0, |a| *a), 3)
    }
}
impl<'a> From<&'a ArgMatches> for CommandLineArgs<'a> {
    fn from(args: &'a ArgMatches) -> Self {
        Self(args)
    }
}

/// The common command line reporting options.
struct ReportArgs<'a>(
    /// The subcommand command line arguments.
    &'a ArgMatches,
);
impl<'a> ReportArgs<'a> {
    /// Generate a textual based report.
    const TEXT: &'static str = "REPORT_TEXT";
    /// Generate a CSV based report.
    const CSV: &'static str = "REPORT_CSV";
    /// Generate a JSON based report.
    const JSON: &'static str = "REPORT_JSON";
    /// For JSON reports output the data in a pretty format.
    const PRETTY: &'static str = "REPORT_JSON_PRETTY";
    pub fn new(args: &'a ArgMatches) -> Self {
        Self(args)
    }
    /// Get the report arguments.
    pub fn get() -> Vec<Arg> {
        vec![
            Arg::new(Self::TEXT)
                .long("text")
                .action(ArgAction::SetTrue)
                .help("The report will be plain Text (default)"),
            Arg::new(Self::CSV).long("csv").action(ArgAction::SetTrue).help("The report will be in CSV format."),
            Arg::new(Self::JSON).long("json").action(ArgAction::SetTrue).help("The report will be in JSON format."),
            Arg::new(Self::PRETTY)
                .short('P')
                .long("pretty")
                .action(ArgAction::SetTrue)
                .requires(Self::JSON)
                .help("For JSON reports output will be pretty printed."),
        ]
    }
    /// Get the command argument group for selecting either text, CSV, or JSON reports,
    pub fn arg_group() -> ArgGroup {
        ArgGroup::new("REPORT_TYPES").args([Self::TEXT, Self::CSV, Self::JSON]).required(false)
    }
    /// Get the text based report flag.
    #[allow(unused)]
    pub fn text(&self) -> bool {
        self.0.get_flag(ReportArgs::TEXT) || !(self.csv() || self.json())
    }
    /// Get the `CSV` based report flag.
    pub fn csv(&self) -> bool {
        self.0.get_flag(ReportArgs::CSV)
    }
    /// Get the `JSON` based report flag.
    pub fn json(&self) -> bool {
        self.0.get_flag(ReportArgs::JSON)
    }
    /// Get the `JSON` pretty printed report flag.
    pub fn pretty(&self) -> bool {
        self.0.get_flag(ReportArgs::PRETTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli() {
        // bootstrap up the cli to make sure there aren't subcommand argument collisions.
        match command().no_binary_name(true).try_get_matches_from(vec!["--version"]) {
            Ok(_) => unreachable!("clap should return an error for version"),
            Err(err) => assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion),
        };
        command().debug_assert();
    }

    macro_rules! arg_matches {
        ($cmd:expr, $args:expr) => {{
            let mut raw_args = $cmd.try_get_matches_from_mut($args).unwrap();
            let (_, args) = raw_args.remove_subcommand().unwrap();
            args
        }};
    }

    macro_rules! command {
        ($sub_command:expr) => {
            Command::new("test").no_binary_name(true).subcommand($sub_command)
        };
    }

    #[test]
    fn report_args() {
        let mut cmd = command!(Command::new("testcase").args(ReportArgs::get()).group(ReportArgs::arg_group()));
        let args = arg_matches!(cmd, &["testcase"]);
        let report_args = ReportArgs::new(&args);
        assert!(report_args.text());
        assert!(!report_args.csv());
        assert!(!report_args.json());
        let args = arg_matches!(cmd, &["testcase", "--csv"]);
        let report_args = ReportArgs::new(&args);
        assert!(!report_args.text());
        assert!(report_args.csv());
        assert!(!report_args.json());
        let args = arg_matches!(cmd, &["testcase", "--json"]);
        let report_args = ReportArgs::new(&args);
        assert!(!report_args.text());
        assert!(!report_args.csv());
        assert!(report_args.json());
        assert!(!report_args.pretty());
        let args = arg_matches!(cmd, &["testcase", "--json", "--pretty"]);
        let report_args = ReportArgs::new(&args);
        assert!(report_args.json());
        assert!(report_args.pretty());
        assert!(cmd.try_get_matches_from_mut(["testcase", "--pretty"]).is_err());
        assert!(cmd.try_get_matches_from_mut(["testcase", "--text", "--csv"]).is_err());
        assert!(cmd.try_get_matches_from_mut(["testcase", "--text", "--json"]).is_err());
        assert!(cmd.try_get_matches_from_mut(["testcase", "--csv", "--json"]).is_err());
    }

    #[test]
    fn command_args() {
        let mut cmd = command!(Command::new("testcase").args(CommandLineArgs::get()));
        let matches = arg_matches!(cmd, &["testcase"]);
        let command_args = CommandLineArgs(&matches);
        assert!(command_args.config_file().is_none());
        assert!(command_args.logfile().is_none());
        assert!(!command_args.append());
        assert_eq!(command_args.verbosity(), 0);
        let matches = arg_matches!(cmd, &["testcase", "-c=forecast.toml", "-l=logfile", "-a", "-vvvv"]);
        let command_args = CommandLineArgs(&matches);
        assert_eq!(command_args.config_file().unwrap(), PathBuf::from("forecast.toml"));
        assert_eq!(command_args.logfile().unwrap(), PathBuf::from("logfile"));
        assert!(command_args.append());
        assert_eq!(command_args.verbosity(), 3);
        assert!(cmd.try_get_matches_from_mut(["testcase", "-a"]).is_err());
    }

    #[test]
    fn filenames() {
        let manifest_dir = env!("CARGO_MANIFEST_DIR");
        assert!(parse_filename("").is_err());
        assert!(parse_filename(manifest_dir).is_err());
        assert!(parse_filename("no/such/directory/file.json").is_err());
        assert_eq!(parse_filename("file.json").unwrap(), PathBuf::from("file.json"));
        let cargo_toml = format!("{}/Cargo.toml", manifest_dir);
        assert_eq!(parse_existing_file(&cargo_toml).unwrap(), PathBuf::from(&cargo_toml));
        assert!(parse_existing_file("file.json").is_err());
    }
}
