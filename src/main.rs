mod calculator;
mod error;
mod format;
mod histogram;
mod input;
mod logging;
mod operation;
mod stats;

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use argh::FromArgs;
use calculator::Calculator;
use error::CalcError;
use input::Source;
use operation::Operation;

#[derive(FromArgs, Debug)]
/// Command-line calculator over streams of numbers, one per line
struct Args {
    /// number of histogram bins (hist only, default 10)
    #[argh(option, short = 'b')]
    bins: Option<usize>,

    /// log debug information to standard error
    #[argh(switch, short = 'v')]
    verbose: bool,

    /// operation to apply, `calc help` lists them
    #[argh(positional)]
    operation: String,

    /// input files (standard input when omitted); for hist, a trailing
    /// number is the bin count
    #[argh(positional)]
    inputs: Vec<String>,
}

/// Splits positional inputs into sources and, for `hist`, a trailing bin
/// count made only of digits.
fn split_inputs(
    operation: Operation,
    mut inputs: Vec<String>,
    bins: Option<usize>,
) -> Result<(Vec<Source>, Option<usize>), CalcError> {
    let trailing_count = operation == Operation::Hist
        && inputs
            .last()
            .map_or(false, |arg| !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()));

    let bins = match (trailing_count, bins) {
        (false, bins) => bins,
        (true, Some(_)) => {
            return Err(CalcError::InvalidArgument {
                reason: "bin count given both as --bins and as an argument".to_string(),
            })
        }
        (true, None) => {
            let arg = inputs.pop().unwrap_or_default();
            let count = arg.parse().map_err(|_| CalcError::InvalidArgument {
                reason: format!("bin count {} is too large", arg),
            })?;
            Some(count)
        }
    };

    let sources = inputs.iter().map(|arg| Source::from_arg(arg)).collect();
    Ok((sources, bins))
}

fn run(args: Args) -> Result<()> {
    let operation: Operation = args.operation.parse()?;
    let (sources, bins) = split_inputs(operation, args.inputs, args.bins)?;
    let calculator = Calculator::new(operation, sources, bins)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    calculator.run(&mut out)?;
    out.flush().context("unable to write output")?;
    Ok(())
}

fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<CalcError>()
        .map_or(1, CalcError::exit_code)
}

/// A reader that stopped listening (`calc exp | head`) is not a failure.
fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .map_or(false, |e| e.kind() == io::ErrorKind::BrokenPipe)
    })
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();
    logging::init(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if is_broken_pipe(&err) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("calc: {:#}", err);
            ExitCode::from(exit_status(&err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn hist_takes_a_trailing_bin_count() {
        let (sources, bins) =
            split_inputs(Operation::Hist, strings(&["data.txt", "21"]), None).unwrap();
        assert_eq!(sources, vec![Source::File(PathBuf::from("data.txt"))]);
        assert_eq!(bins, Some(21));
    }

    #[test]
    fn hist_bin_count_alone_reads_stdin() {
        let (sources, bins) = split_inputs(Operation::Hist, strings(&["5"]), None).unwrap();
        assert!(sources.is_empty());
        assert_eq!(bins, Some(5));
    }

    #[test]
    fn other_operations_treat_digits_as_files() {
        let (sources, bins) = split_inputs(Operation::Max, strings(&["21"]), None).unwrap();
        assert_eq!(sources, vec![Source::File(PathBuf::from("21"))]);
        assert_eq!(bins, None);
    }

    #[test]
    fn bin_count_given_twice_is_rejected() {
        assert!(matches!(
            split_inputs(Operation::Hist, strings(&["7"]), Some(3)),
            Err(CalcError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn exit_codes_follow_error_class() {
        let err = anyhow::Error::new(CalcError::EmptyStream { operation: "max" });
        assert_eq!(exit_status(&err), 66);
        let err = anyhow::Error::new(CalcError::InvalidArgument {
            reason: "bins".to_string(),
        })
        .context("while parsing arguments");
        assert_eq!(exit_status(&err), 64);
        assert_eq!(exit_status(&anyhow::anyhow!("something else")), 1);
    }

    #[test]
    fn broken_pipe_is_detected_through_context() {
        let err = anyhow::Error::new(io::Error::from(io::ErrorKind::BrokenPipe))
            .context("unable to write output");
        assert!(is_broken_pipe(&err));
        assert!(!is_broken_pipe(&anyhow::anyhow!("nope")));
    }
}
