use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;

use crate::error::CalcError;
use crate::format;
use crate::histogram::{self, Histogram};
use crate::input::{self, Numbers, Reading, Source};
use crate::operation::Operation;
use crate::stats::{self, Moments, Summary};

pub const USAGE: &str = "Usage: calc [-v] [-b <bins>] <operation> [file ...] [bins]
Reads a list of numbers from the files, or standard input if none are given,
and performs the calculation named by the operation.
Available operations:";

/// Runs one operation over a number stream.
#[derive(Debug)]
pub struct Calculator {
    operation: Operation,
    sources: Vec<Source>,
    bins: usize,
}

impl Calculator {
    /// Without sources, standard input is read.
    pub fn new(
        operation: Operation,
        sources: Vec<Source>,
        bins: Option<usize>,
    ) -> Result<Calculator, CalcError> {
        let bins = match (operation, bins) {
            (Operation::Hist, None) => histogram::DEFAULT_BINS,
            (Operation::Hist, Some(bins)) if bins == 0 || bins > histogram::MAX_BINS => {
                return Err(CalcError::InvalidArgument {
                    reason: format!(
                        "bin count must be an integer from 1 to {}, got {}",
                        histogram::MAX_BINS,
                        bins
                    ),
                })
            }
            (Operation::Hist, Some(bins)) => bins,
            (_, None) => histogram::DEFAULT_BINS,
            (operation, Some(_)) => {
                return Err(CalcError::InvalidArgument {
                    reason: format!("'{}' takes no numeric argument", operation),
                })
            }
        };
        let sources = if sources.is_empty() {
            vec![Source::Stdin]
        } else {
            sources
        };

        Ok(Calculator {
            operation,
            sources,
            bins,
        })
    }

    pub fn run(&self, out: &mut impl Write) -> Result<()> {
        debug!(
            operation = %self.operation,
            kind = ?self.operation.kind(),
            sources = self.sources.len(),
            "running"
        );
        self.execute(self.sources.iter().map(Source::open), out)
    }

    fn execute<R, I>(&self, inputs: I, out: &mut impl Write) -> Result<()>
    where
        R: BufRead,
        I: IntoIterator<Item = Result<Numbers<R>, CalcError>>,
    {
        match self.operation {
            Operation::Help => {
                writeln!(out, "{}", USAGE)?;
                writeln!(out, "{}", Operation::command_list())?;
                Ok(())
            }
            Operation::Exp => self.transform(inputs, out, |x| Some(x.exp())),
            Operation::Log => self.transform(inputs, out, |x| (x > 0.0).then(|| x.ln())),
            Operation::Sqrt => self.transform(inputs, out, |x| (x >= 0.0).then(|| x.sqrt())),
            Operation::Print => self.transform(inputs, out, Some),
            Operation::Cumsum => {
                let mut total = 0.0;
                self.transform(inputs, out, |x| {
                    total += x;
                    Some(total)
                })
            }
            Operation::Cumprod => {
                let mut total = 1.0;
                self.transform(inputs, out, |x| {
                    total *= x;
                    Some(total)
                })
            }
            Operation::Sum | Operation::Add => {
                self.reduce(inputs, out, |data| Some(format::value(stats::sum(&data))))
            }
            Operation::Prod => {
                self.reduce(inputs, out, |data| Some(format::value(stats::product(&data))))
            }
            Operation::Max => self.reduce(inputs, out, |data| {
                Moments::from_values(&data).max().map(format::value)
            }),
            Operation::Min => self.reduce(inputs, out, |data| {
                Moments::from_values(&data).min().map(format::value)
            }),
            Operation::Mean => self.reduce(inputs, out, |data| {
                Moments::from_values(&data).mean().map(format::value)
            }),
            Operation::Var => self.reduce(inputs, out, |data| {
                Moments::from_values(&data)
                    .sample_variance()
                    .map(format::value)
            }),
            Operation::Std => self.reduce(inputs, out, |data| {
                Moments::from_values(&data)
                    .sample_variance()
                    .map(|variance| format::value(variance.sqrt()))
            }),
            Operation::MeanVar => self.reduce(inputs, out, |data| {
                let moments = Moments::from_values(&data);
                Some(format!(
                    "{}\t{}",
                    format::value(moments.mean()?),
                    format::value(moments.sample_variance()?)
                ))
            }),
            Operation::Median => {
                self.reduce(inputs, out, |mut data| stats::median(&mut data).map(format::value))
            }
            Operation::Hist => self.reduce_within(inputs, out, f64::is_finite, |data| {
                Histogram::compute(&data, self.bins).map(|hist| hist.render())
            }),
            Operation::Summary => self.reduce(inputs, out, |data| {
                Summary::compute(&data)
                    .map(|summary| format!("{}\n{}", Summary::HEADER, summary.row()))
            }),
        }
    }

    /// Writes `f(x)` for every number as soon as it is read. `f` returns
    /// `None` for values outside the operation's domain.
    fn transform<R, I, F>(&self, inputs: I, out: &mut impl Write, mut f: F) -> Result<()>
    where
        R: BufRead,
        I: IntoIterator<Item = Result<Numbers<R>, CalcError>>,
        F: FnMut(f64) -> Option<f64>,
    {
        let mut count = 0usize;
        for numbers in inputs {
            let numbers = numbers?;
            let source_name = numbers.source_name().to_string();
            for reading in numbers {
                let Reading { value, line } = reading?;
                let result = f(value).ok_or_else(|| CalcError::Domain {
                    operation: self.operation.name(),
                    value,
                    source_name: source_name.clone(),
                    line,
                })?;
                writeln!(out, "{}", format::value(result))?;
                count += 1;
            }
        }
        debug!(count, "transformed");
        Ok(())
    }

    /// Reads the whole stream, then writes the single report `f` builds.
    /// `f` returns `None` when the stream is too short to summarize.
    fn reduce<R, I, F>(&self, inputs: I, out: &mut impl Write, f: F) -> Result<()>
    where
        R: BufRead,
        I: IntoIterator<Item = Result<Numbers<R>, CalcError>>,
        F: FnOnce(Vec<f64>) -> Option<String>,
    {
        let data = input::collect(inputs)?;
        self.report(out, f(data))
    }

    /// Like `reduce`, but every number must pass `accepts` first.
    fn reduce_within<R, I, F>(
        &self,
        inputs: I,
        out: &mut impl Write,
        accepts: fn(f64) -> bool,
        f: F,
    ) -> Result<()>
    where
        R: BufRead,
        I: IntoIterator<Item = Result<Numbers<R>, CalcError>>,
        F: FnOnce(Vec<f64>) -> Option<String>,
    {
        let mut data = Vec::new();
        for numbers in inputs {
            let numbers = numbers?;
            let source_name = numbers.source_name().to_string();
            for reading in numbers {
                let Reading { value, line } = reading?;
                if !accepts(value) {
                    return Err(CalcError::Domain {
                        operation: self.operation.name(),
                        value,
                        source_name,
                        line,
                    }
                    .into());
                }
                data.push(value);
            }
        }
        self.report(out, f(data))
    }

    fn report(&self, out: &mut impl Write, report: Option<String>) -> Result<()> {
        let report = report.ok_or(CalcError::EmptyStream {
            operation: self.operation.name(),
        })?;
        writeln!(out, "{}", report)?;
        Ok(())
    }
}
