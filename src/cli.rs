use clap::Parser;
use std::ffi::OsString;

use crate::error::ParseError;

/// Fixed text printed for `--help`.
pub const USAGE: &str = "\
Reads IPPcode22 source code from standard input,
checks its lexical and syntactic correctness and writes
the XML representation of the program to standard output.

Usage:   parse
         parse --help
Options:
         --help: print this help and exit
";

/// The command line takes no positional arguments and a single flag.
/// clap's own help and version handling is switched off so the usage
/// text stays fixed.
#[derive(Parser, Debug)]
#[command(name = "parse", disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Print usage and exit
    #[arg(long)]
    pub help: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Parse,
}

/// Parse the full argument vector (program name first).
pub fn parse_args<I, T>(args: I) -> Result<Command, ParseError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    // clap treats a bare `--` as the end of options; here it is just
    // another argument, so anything but nothing or a lone `--help` fails
    match &args[1.min(args.len())..] {
        [] => {}
        [flag] if flag == "--help" => {}
        _ => return Err(ParseError::Usage),
    }

    let cli = Cli::try_parse_from(args).map_err(|_| ParseError::Usage)?;
    Ok(if cli.help {
        Command::Help
    } else {
        Command::Parse
    })
}
