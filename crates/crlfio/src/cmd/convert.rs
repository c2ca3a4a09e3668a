use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use crlfio_transcode::Mode;

use crate::cmd::ConvertArgs;
use crate::exit::{io_error, CliResult, SUCCESS};
use crate::output::{print_report, InputReport, InputStatus, OutputFormat};

const STDIN_LABEL: &str = "-";

pub fn run(mode: Mode, args: ConvertArgs, format: OutputFormat) -> CliResult<i32> {
    let mut out = BufWriter::new(io::stdout().lock());
    let mut buf = vec![0u8; args.buffer_size];
    let mut reports = Vec::with_capacity(args.files.len().max(1));

    tracing::debug!(
        %mode,
        buffer_size = args.buffer_size,
        inputs = args.files.len(),
        "starting conversion"
    );

    let outcome = if args.files.is_empty() {
        convert_input(mode, STDIN_LABEL, io::stdin().lock(), &mut out, &mut buf).map(|report| {
            print_failure(&report);
            reports.push(report);
        })
    } else {
        args.files.iter().try_for_each(|path| {
            let report = match File::open(path) {
                Ok(file) => convert_input(mode, &label(path), file, &mut out, &mut buf)?,
                Err(err) => failed_open(mode, path, err),
            };
            print_failure(&report);
            reports.push(report);
            Ok(())
        })
    };

    let outcome = outcome.and_then(|()| out.flush().map_err(StreamError::Write));
    match outcome {
        Ok(()) => {}
        // The consumer went away (`crlfio dos2unix big.txt | head`).
        Err(StreamError::Write(err)) if err.kind() == ErrorKind::BrokenPipe => {
            tracing::debug!("stdout closed early, stopping");
            return Ok(SUCCESS);
        }
        Err(StreamError::Write(err)) => return Err(io_error("write to stdout failed", err)),
    }

    let exit_code = reports
        .iter()
        .rev()
        .find_map(|r| r.failure_code)
        .unwrap_or(SUCCESS);

    if args.stats {
        let rows: Vec<InputReport> = reports.into_iter().map(|r| r.report).collect();
        print_report(&rows, format);
    }

    Ok(exit_code)
}

/// Errors that stop the whole run. Input errors are recorded per input.
enum StreamError {
    Write(io::Error),
}

struct Converted {
    report: InputReport,
    failure_code: Option<i32>,
}

fn convert_input<R: Read, W: Write>(
    mode: Mode,
    input: &str,
    source: R,
    out: &mut W,
    buf: &mut [u8],
) -> Result<Converted, StreamError> {
    let mut transcoder = mode.wrap(CountingReader::new(source));
    let mut written = 0u64;

    let read_error = loop {
        let n = match transcoder.read(buf) {
            Ok(0) => break None,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => break Some(err),
        };
        out.write_all(&buf[..n]).map_err(StreamError::Write)?;
        written += n as u64;
    };

    let bytes_read = transcoder.get_ref().count;
    let (status, error, failure_code) = match read_error {
        None => {
            tracing::debug!(input, bytes_read, bytes_written = written, "converted");
            (InputStatus::Ok, None, None)
        }
        Some(err) => {
            let err = io_error("read failed", err);
            tracing::warn!(input, bytes_read, error = %err, "conversion stopped early");
            (InputStatus::Failed, Some(err.message), Some(err.code))
        }
    };

    Ok(Converted {
        report: InputReport {
            input: input.to_string(),
            mode: mode.as_str(),
            bytes_read,
            bytes_written: written,
            status,
            error,
        },
        failure_code,
    })
}

fn failed_open(mode: Mode, path: &Path, err: io::Error) -> Converted {
    let err = io_error("open failed", err);
    tracing::warn!(input = %path.display(), error = %err, "skipping input");
    Converted {
        report: InputReport {
            input: label(path),
            mode: mode.as_str(),
            bytes_read: 0,
            bytes_written: 0,
            status: InputStatus::Failed,
            error: Some(err.message),
        },
        failure_code: Some(err.code),
    }
}

fn print_failure(converted: &Converted) {
    let report = &converted.report;
    if report.status == InputStatus::Failed {
        let message = report.error.as_deref().unwrap_or("conversion failed");
        eprintln!("crlfio: {}: {message}", report.input);
    }
}

fn label(path: &Path) -> String {
    path.display().to_string()
}

/// Counts bytes pulled from the source before conversion.
struct CountingReader<R> {
    inner: R,
    count: u64,
}

impl<R> CountingReader<R> {
    fn new(inner: R) -> Self {
        Self { inner, count: 0 }
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count += n as u64;
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenAfter {
        data: &'static [u8],
        fail_kind: ErrorKind,
        served: bool,
    }

    impl Read for BrokenAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::from(self.fail_kind));
            }
            self.served = true;
            buf[..self.data.len()].copy_from_slice(self.data);
            Ok(self.data.len())
        }
    }

    #[test]
    fn converts_and_counts() {
        let mut out = Vec::new();
        let mut buf = [0u8; 4];
        let source = &b"a\r\nb\r\n"[..];
        let converted = convert_input(Mode::CrlfToLf, "mem", source, &mut out, &mut buf)
            .unwrap_or_else(|_| panic!("writing to a Vec cannot fail"));

        assert_eq!(out, b"a\nb\n");
        assert_eq!(converted.report.bytes_read, 6);
        assert_eq!(converted.report.bytes_written, 4);
        assert_eq!(converted.report.status, InputStatus::Ok);
        assert_eq!(converted.failure_code, None);
    }

    #[test]
    fn read_error_keeps_converted_prefix() {
        let source = BrokenAfter {
            data: b"one\ntwo\n",
            fail_kind: ErrorKind::PermissionDenied,
            served: false,
        };
        let mut out = Vec::new();
        let mut buf = [0u8; 64];
        let converted = convert_input(Mode::LfToCrlf, "flaky", source, &mut out, &mut buf)
            .unwrap_or_else(|_| panic!("writing to a Vec cannot fail"));

        assert_eq!(out, b"one\r\ntwo\r\n");
        assert_eq!(converted.report.status, InputStatus::Failed);
        assert_eq!(converted.failure_code, Some(crate::exit::PERMISSION_DENIED));
        let message = converted.report.error.as_deref().unwrap();
        assert!(message.starts_with("read failed"));
    }

    #[test]
    fn write_error_stops_the_run() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::from(ErrorKind::BrokenPipe))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut buf = [0u8; 16];
        let result = convert_input(Mode::CrToLf, "mem", &b"x\ry"[..], &mut Closed, &mut buf);
        let Err(StreamError::Write(err)) = result else {
            panic!("expected the write error to stop the run");
        };
        assert_eq!(err.kind(), ErrorKind::BrokenPipe);
    }

    #[test]
    fn missing_file_is_reported_not_fatal() {
        let converted = failed_open(
            Mode::CrlfToLf,
            Path::new("/nonexistent/crlfio"),
            io::Error::from(ErrorKind::NotFound),
        );
        assert_eq!(converted.report.status, InputStatus::Failed);
        assert_eq!(converted.failure_code, Some(crate::exit::FAILURE));
        assert_eq!(converted.report.input, "/nonexistent/crlfio");
    }
}
