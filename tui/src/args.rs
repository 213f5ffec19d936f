//! Parsing command-line arguments.

use crate::settings;
use clap::{command, error::ErrorKind, value_parser, Arg, ArgAction, Error};
use rlifesim_lib::{BoundaryPolicy, Config, LineEnding};
use std::path::PathBuf;

/// Largest width or height accepted from the command line or a config file.
const MAX_SIZE: i32 = 1 << 16;

/// A struct to store the parse results.
pub(crate) struct Args {
    pub(crate) config: Config,
    pub(crate) input: Option<PathBuf>,
    pub(crate) output: Option<PathBuf>,
    pub(crate) generations: u64,
    pub(crate) random: bool,
    pub(crate) all: bool,
    pub(crate) line_ending: LineEnding,
    pub(crate) dump_config: Option<PathBuf>,
    #[cfg(feature = "tui")]
    pub(crate) no_tui: bool,
}

impl Args {
    /// Parses the command-line arguments.
    pub(crate) fn parse() -> Result<Self, Error> {
        let mut app = command!()
            .long_about(
                "Conway's Game of Life on a finite grid\n\
                 \n\
                 Patterns are read and written in Plaintext (.cells) format:\n\
                 * Lines starting with `!` are comments;\n\
                 * Dead cells are represented by `.`;\n\
                 * Living cells are represented by `O` (any other character \
                 is also read as a living cell).\n\
                 \n\
                 For a description of the format, please visit:\n\
                 https://conwaylife.com/wiki/Plaintext",
            )
            .arg(
                Arg::new("INPUT")
                    .help("Pattern to start from")
                    .long_help(
                        "Pattern to start from, in Plaintext format\n\
                         The size of the pattern overrides the width and the height.\n",
                    )
                    .index(1)
                    .value_parser(value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("CONFIG")
                    .help("Reads the configuration from a file")
                    .long_help(
                        "Reads the configuration from a file\n\
                         The format is chosen by the extension: .toml, .yaml, .yml or .json.\n\
                         Other command-line options override values from the file.\n",
                    )
                    .short('c')
                    .long("config")
                    .value_parser(value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("DUMPCONFIG")
                    .help("Writes the effective configuration to a file")
                    .long("dump-config")
                    .value_parser(value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("WIDTH")
                    .help("Width of the universe")
                    .short('x')
                    .long("width")
                    .value_parser(value_parser!(i32).range(1..=i64::from(MAX_SIZE))),
            )
            .arg(
                Arg::new("HEIGHT")
                    .help("Height of the universe")
                    .short('y')
                    .long("height")
                    .value_parser(value_parser!(i32).range(1..=i64::from(MAX_SIZE))),
            )
            .arg(
                Arg::new("BOUNDARY")
                    .help("Boundary policy")
                    .long_help(
                        "Boundary policy\n\
                         \"bounded\" means that cells outside the universe are always dead.\n\
                         \"toroidal\" means that the universe wraps around at both edges.\n",
                    )
                    .short('b')
                    .long("boundary")
                    .value_parser(["bounded", "toroidal", "b", "t"]),
            )
            .arg(
                Arg::new("GENLEN")
                    .help("Milliseconds between two generations")
                    .short('g')
                    .long("gen-length")
                    .value_parser(value_parser!(u64)),
            )
            .arg(
                Arg::new("RANDOM")
                    .help("Starts from a random universe")
                    .short('r')
                    .long("random")
                    .action(ArgAction::SetTrue)
                    .conflicts_with("INPUT"),
            )
            .arg(
                Arg::new("SEED")
                    .help("Seed for the random universe")
                    .short('s')
                    .long("seed")
                    .value_parser(value_parser!(u64)),
            )
            .arg(
                Arg::new("NEIGHBORS")
                    .help("Shows the number of living neighbors of each cell")
                    .long("show-neighbors")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("GENERATIONS")
                    .help("Number of generations to run before writing the result")
                    .short('n')
                    .long("generations")
                    .value_parser(value_parser!(u64))
                    .default_value("0"),
            )
            .arg(
                Arg::new("OUTPUT")
                    .help("Where to write the result")
                    .long_help(
                        "Where to write the result\n\
                         Writes to the standard output if not given.\n",
                    )
                    .short('o')
                    .long("output")
                    .value_parser(value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("CRLF")
                    .help("Ends written lines with CRLF instead of LF")
                    .long("crlf")
                    .action(ArgAction::SetTrue),
            );

        #[cfg(feature = "tui")]
        {
            app = app
                .arg(
                    Arg::new("ALL")
                        .help("Prints every generation instead of only the last one")
                        .long_help(
                            "Prints every generation instead of only the last one\n\
                             Only useful when --no-tui is set.\n",
                        )
                        .short('a')
                        .long("all")
                        .action(ArgAction::SetTrue)
                        .requires("NOTUI"),
                )
                .arg(
                    Arg::new("NOTUI")
                        .help("Runs without entering the TUI")
                        .long("no-tui")
                        .action(ArgAction::SetTrue),
                );
        }

        #[cfg(not(feature = "tui"))]
        {
            app = app.arg(
                Arg::new("ALL")
                    .help("Prints every generation instead of only the last one")
                    .short('a')
                    .long("all")
                    .action(ArgAction::SetTrue),
            );
        }

        let matches = app.try_get_matches_from_mut(std::env::args_os())?;

        let mut config = match matches.get_one::<PathBuf>("CONFIG") {
            Some(path) => settings::read_config(path)
                .map_err(|e| app.error(ErrorKind::InvalidValue, e))?,
            None => Config::default(),
        };

        if let Some(&width) = matches.get_one::<i32>("WIDTH") {
            config.width = width;
        }
        if let Some(&height) = matches.get_one::<i32>("HEIGHT") {
            config.height = height;
        }
        if let Some(boundary) = matches.get_one::<String>("BOUNDARY") {
            config.policy = boundary
                .parse::<BoundaryPolicy>()
                .map_err(|e| app.error(ErrorKind::InvalidValue, e))?;
        }
        if let Some(&generation_length) = matches.get_one::<u64>("GENLEN") {
            config.generation_length = generation_length;
        }
        if let Some(&seed) = matches.get_one::<u64>("SEED") {
            config.seed = Some(seed);
        }
        if matches.get_flag("NEIGHBORS") {
            config.show_neighbors = true;
        }

        if !valid_size(config.width) || !valid_size(config.height) {
            return Err(app.error(
                ErrorKind::InvalidValue,
                format!("width and height must be integers from 1 to {}", MAX_SIZE),
            ));
        }

        let line_ending = if matches.get_flag("CRLF") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        };

        Ok(Args {
            config,
            input: matches.get_one::<PathBuf>("INPUT").cloned(),
            output: matches.get_one::<PathBuf>("OUTPUT").cloned(),
            generations: *matches.get_one::<u64>("GENERATIONS").unwrap_or(&0),
            random: matches.get_flag("RANDOM"),
            all: matches.get_flag("ALL"),
            line_ending,
            dump_config: matches.get_one::<PathBuf>("DUMPCONFIG").cloned(),
            #[cfg(feature = "tui")]
            no_tui: matches.get_flag("NOTUI"),
        })
    }
}

fn valid_size(size: i32) -> bool {
    (1..=MAX_SIZE).contains(&size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_bounds() {
        assert!(valid_size(1));
        assert!(valid_size(MAX_SIZE));
        assert!(!valid_size(0));
        assert!(!valid_size(-3));
        assert!(!valid_size(MAX_SIZE + 1));
        assert!(!valid_size(2_000_000_000));
    }
}
