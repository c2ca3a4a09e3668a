use clap::builder::TypedValueParser;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crlfio_transcode::Mode;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod convert;
pub mod version;

pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;
pub const MAX_BUFFER_SIZE: u64 = 64 * 1024 * 1024;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert LF line endings to CR LF.
    Unix2dos(ConvertArgs),
    /// Convert CR LF line endings to LF.
    Dos2unix(ConvertArgs),
    /// Convert CR and CR LF line endings to LF.
    Mac2unix(ConvertArgs),
    /// Convert with an explicitly named mode.
    Convert(ModeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Unix2dos(args) => convert::run(Mode::LfToCrlf, args, format),
        Command::Dos2unix(args) => convert::run(Mode::CrlfToLf, args, format),
        Command::Mac2unix(args) => convert::run(Mode::CrToLf, args, format),
        Command::Convert(args) => convert::run(args.mode, args.convert, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Files to convert, in order. Reads stdin when none are given.
    pub files: Vec<PathBuf>,
    /// Size in bytes of the buffer each read is converted in.
    #[arg(
        long,
        value_name = "BYTES",
        env = "CRLFIO_BUFFER_SIZE",
        default_value_t = DEFAULT_BUFFER_SIZE,
        value_parser = clap::value_parser!(u64).range(1..=MAX_BUFFER_SIZE).map(|n| n as usize)
    )]
    pub buffer_size: usize,
    /// Print a per-input summary to stderr when done.
    #[arg(long)]
    pub stats: bool,
}

#[derive(Args, Debug)]
pub struct ModeArgs {
    /// Conversion to apply: lf-to-crlf, crlf-to-lf or cr-to-lf (or unix2dos,
    /// dos2unix, mac2unix).
    #[arg(long, short = 'm', env = "CRLFIO_MODE")]
    pub mode: Mode,
    #[command(flatten)]
    pub convert: ConvertArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
