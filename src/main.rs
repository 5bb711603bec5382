mod app;
mod command;
mod config;
mod consts;
mod game;
mod logging;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::game::Game;
use anyhow::Context;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
};
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Parsed command-line arguments
#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    /// Configuration file given with `--config`
    config: Option<PathBuf>,

    /// Log file given with `--log-file`
    log_file: Option<PathBuf>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }
}

static USAGE: &str = "\
Usage: gridsnake [<options>]

Play Snake in the terminal

Options:
  -c, --config <FILE>   Read configuration from the given file
      --log-file <FILE> Append log messages to the given file
  -h, --help            Display this help message and exit
  -V, --version         Show the program version and exit
";

fn main() -> ExitCode {
    match Command::from_parser(Parser::from_env()) {
        Ok(Command::Run(args)) => match run(args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => error_exit(&e),
        },
        Ok(Command::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e}");
            eprintln!("Run `gridsnake --help` for usage.");
            ExitCode::from(2)
        }
    }
}

fn run(args: Arguments) -> anyhow::Result<()> {
    let mut config = match args.config {
        Some(path) => Config::load(&path, false),
        None => Config::load(&Config::default_path()?, true),
    }
    .context("failed to load configuration")?;
    if let Some(path) = args.log_file {
        config.log.file = Some(path);
    }
    logging::init(&config.log)?;
    let app = App::new(Game::new(), config.game.tick_period());
    let terminal = ratatui::init();
    let r = set_focus_reporting(&mut io::stdout(), true).and_then(|()| {
        let r = app.run(terminal);
        r.and(set_focus_reporting(&mut io::stdout(), false))
    });
    ratatui::restore();
    r.or_else(ignore_broken_pipe).map_err(Into::into)
}

/// Turn the terminal's reporting of focus gained/lost events on or off
fn set_focus_reporting<W: Write>(out: &mut W, enable: bool) -> io::Result<()> {
    if enable {
        execute!(out, EnableFocusChange)
    } else {
        execute!(out, DisableFocusChange)
    }
}

fn ignore_broken_pipe(e: io::Error) -> io::Result<()> {
    if e.kind() == ErrorKind::BrokenPipe {
        Ok(())
    } else {
        Err(e)
    }
}

fn error_exit(e: &anyhow::Error) -> ExitCode {
    tracing::error!("{e:#}");
    eprintln!("gridsnake: {e:?}");
    ExitCode::from(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], Command::Run(Arguments::default()))]
    #[case(&["--help"], Command::Help)]
    #[case(&["-h"], Command::Help)]
    #[case(&["-V"], Command::Version)]
    #[case(&["--version", "--bogus"], Command::Version)]
    #[case(
        &["-c", "snake.toml"],
        Command::Run(Arguments {
            config: Some(PathBuf::from("snake.toml")),
            log_file: None,
        })
    )]
    #[case(
        &["--config=snake.toml", "--log-file", "/tmp/snake.log"],
        Command::Run(Arguments {
            config: Some(PathBuf::from("snake.toml")),
            log_file: Some(PathBuf::from("/tmp/snake.log")),
        })
    )]
    fn test_parse_args(#[case] args: &[&str], #[case] cmd: Command) {
        let parser = Parser::from_iter(std::iter::once("gridsnake").chain(args.iter().copied()));
        assert_eq!(Command::from_parser(parser).unwrap(), cmd);
    }

    #[rstest]
    #[case(&["--bogus"])]
    #[case(&["extra"])]
    #[case(&["--config"])]
    fn test_parse_args_error(#[case] args: &[&str]) {
        let parser = Parser::from_iter(std::iter::once("gridsnake").chain(args.iter().copied()));
        assert!(Command::from_parser(parser).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn focus_reporting_sequences() {
        let mut out = Vec::new();
        set_focus_reporting(&mut out, true).unwrap();
        assert_eq!(out, b"\x1B[?1004h");
        out.clear();
        set_focus_reporting(&mut out, false).unwrap();
        assert_eq!(out, b"\x1B[?1004l");
    }

    #[test]
    fn broken_pipe_is_success() {
        assert!(ignore_broken_pipe(io::Error::from(ErrorKind::BrokenPipe)).is_ok());
        assert!(ignore_broken_pipe(io::Error::from(ErrorKind::Other)).is_err());
    }
}
