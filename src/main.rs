mod app;
mod clock;
mod command;
mod config;
mod consts;
mod game;
mod input;
mod util;
use crate::app::App;
use crate::config::{Config, LoggingConfig};
use crate::input::TerminalInput;
use anyhow::Context;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, ValueExt};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use simplelog::WriteLogger;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = concat!(
    "Usage: gridsnake [<options>]\n",
    "\n",
    "Play snake in the terminal\n",
    "\n",
    "Options:\n",
    "  -c, --config <FILE>   Read configuration from the given file\n",
    "      --log-file <FILE> Write log messages to the given file\n",
    "      --seed <N>        Seed the random number generator with N\n",
    "  -h, --help            Display this help message and exit\n",
    "  -V, --version         Show the program version and exit\n",
);

#[derive(Clone, Debug, Eq, PartialEq)]
enum Arguments {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    config: Option<PathBuf>,
    log_file: Option<PathBuf>,
    seed: Option<u64>,
}

impl Arguments {
    fn from_parser(mut parser: lexopt::Parser) -> Result<Arguments, lexopt::Error> {
        let mut opts = RunOptions::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    opts.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Long("seed") => opts.seed = Some(parser.value()?.parse()?),
                Arg::Short('h') | Arg::Long("help") => return Ok(Arguments::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Arguments::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Arguments::Run(opts))
    }
}

fn main() -> ExitCode {
    match Arguments::from_parser(lexopt::Parser::from_env()) {
        Ok(Arguments::Run(opts)) => exit_code(run(opts)),
        Ok(Arguments::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Arguments::Version) => {
            println!("gridsnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e}");
            eprintln!("Run `gridsnake --help` for usage");
            ExitCode::from(2)
        }
    }
}

fn run(opts: RunOptions) -> anyhow::Result<()> {
    let config = match opts.config {
        Some(ref path) => Config::load(path, false),
        None => Config::load(&Config::default_path()?, true),
    }
    .context("failed to load configuration")?;
    init_logging(&config.logging, opts.log_file.as_deref())?;
    info!(
        "Arena {}x{} (border {}), tick period {:?}, initial length {}",
        config.settings.arena.width,
        config.settings.arena.height,
        config.settings.arena.margin,
        config.settings.tick_period,
        config.settings.initial_length,
    );
    let rng = match opts.seed {
        Some(seed) => {
            info!("Using RNG seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };
    let mut terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)
        .and_then(|()| App::new(config.settings, rng).run(&mut terminal, &mut TerminalInput));
    let cleanup = execute!(io::stdout(), DisableFocusChange, DisableMouseCapture);
    ratatui::restore();
    r.and(cleanup).map_err(Into::into)
}

/// Start logging to `log_file` if given, else to the file named in the
/// configuration, if any
fn init_logging(cfg: &LoggingConfig, log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file.or(cfg.file.as_deref()) else {
        return Ok(());
    };
    let file = fs_err::File::create(path).context("failed to open log file")?;
    WriteLogger::init(cfg.level, simplelog::Config::default(), file)
        .map_err(|e| anyhow::anyhow!("failed to initialize logger: {e}"))
}

fn exit_code(r: anyhow::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gridsnake: {e:?}");
            ExitCode::from(2)
        }
    }
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Arguments, lexopt::Error> {
        Arguments::from_parser(lexopt::Parser::from_args(args.iter().copied()))
    }

    #[rstest]
    #[case(&[], Arguments::Run(RunOptions::default()))]
    #[case(&["--help"], Arguments::Help)]
    #[case(&["-V"], Arguments::Version)]
    #[case(&["--seed", "42", "-h"], Arguments::Help)]
    #[case(
        &["-c", "snake.toml", "--log-file", "snake.log", "--seed", "42"],
        Arguments::Run(RunOptions {
            config: Some(PathBuf::from("snake.toml")),
            log_file: Some(PathBuf::from("snake.log")),
            seed: Some(42),
        })
    )]
    #[case(&["--config=snake.toml"], Arguments::Run(RunOptions {
        config: Some(PathBuf::from("snake.toml")),
        ..RunOptions::default()
    }))]
    fn parse_args(#[case] args: &[&str], #[case] expected: Arguments) {
        assert_eq!(parse(args).unwrap(), expected);
    }

    #[rstest]
    #[case(&["--seed", "many"])]
    #[case(&["--seed"])]
    #[case(&["--level"])]
    #[case(&["extra"])]
    fn bad_args(#[case] args: &[&str]) {
        assert!(parse(args).is_err());
    }

    #[test]
    fn broken_pipe() {
        let e = anyhow::Error::from(io::Error::from(ErrorKind::BrokenPipe));
        assert!(is_broken_pipe(&e));
        let e = anyhow::Error::from(io::Error::from(ErrorKind::PermissionDenied));
        assert!(!is_broken_pipe(&e));
        assert!(!is_broken_pipe(&anyhow::anyhow!("failed to load configuration")));
    }

    #[test]
    fn no_log_file() {
        assert!(init_logging(&LoggingConfig::default(), None).is_ok());
    }
}
