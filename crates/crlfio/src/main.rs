mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "crlfio", version, about = "Streaming line-ending converter")]
struct Cli {
    /// Format of the --stats report (stderr).
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        env = "CRLFIO_LOG",
        default_value = "error",
        global = true
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stderr);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crlfio_transcode::Mode;

    #[test]
    fn parses_dos2unix_with_files() {
        let cli = Cli::try_parse_from(["crlfio", "dos2unix", "a.txt", "b.txt"])
            .expect("dos2unix args should parse");

        let Command::Dos2unix(args) = cli.command else {
            panic!("expected dos2unix");
        };
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.buffer_size, cmd::DEFAULT_BUFFER_SIZE);
        assert!(!args.stats);
    }

    #[test]
    fn parses_convert_with_mode_alias() {
        let cli = Cli::try_parse_from([
            "crlfio",
            "convert",
            "--mode",
            "mac2unix",
            "--buffer-size",
            "1",
        ])
        .expect("convert args should parse");

        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.mode, Mode::CrToLf);
        assert_eq!(args.convert.buffer_size, 1);
        assert!(args.convert.files.is_empty());
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = Cli::try_parse_from(["crlfio", "convert", "--mode", "sideways"])
            .expect_err("unknown mode should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn rejects_zero_buffer_size() {
        let err = Cli::try_parse_from(["crlfio", "unix2dos", "--buffer-size", "0"])
            .expect_err("zero buffer should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn buffer_size_accepts_upper_bound() {
        let max = cmd::MAX_BUFFER_SIZE.to_string();
        let cli = Cli::try_parse_from(["crlfio", "dos2unix", "--buffer-size", max.as_str()])
            .expect("largest buffer should parse");

        let Command::Dos2unix(args) = cli.command else {
            panic!("expected dos2unix");
        };
        assert_eq!(args.buffer_size as u64, cmd::MAX_BUFFER_SIZE);

        let above = (cmd::MAX_BUFFER_SIZE + 1).to_string();
        let err = Cli::try_parse_from(["crlfio", "dos2unix", "--buffer-size", above.as_str()])
            .expect_err("oversized buffer should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["crlfio", "mac2unix", "--stats", "--format", "json"])
            .expect("global flags should parse");
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
        assert!(matches!(cli.command, Command::Mac2unix(ref args) if args.stats));
    }
}
