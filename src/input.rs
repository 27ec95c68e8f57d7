//! Reading number streams from files and standard input.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use tracing::debug;

use crate::error::CalcError;

/// Where numbers are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// `-` names standard input, anything else is a path.
    pub fn from_arg(arg: &str) -> Source {
        match arg {
            "-" => Source::Stdin,
            path => Source::File(PathBuf::from(path)),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Source::Stdin => "<stdin>".to_string(),
            Source::File(path) => path.display().to_string(),
        }
    }

    pub fn open(&self) -> Result<Numbers<Box<dyn BufRead>>, CalcError> {
        let reader: Box<dyn BufRead> = match self {
            Source::Stdin => Box::new(io::stdin().lock()),
            Source::File(path) => {
                let file = File::open(path).map_err(|source| CalcError::Io {
                    path: path.clone(),
                    source,
                })?;
                Box::new(BufReader::new(file))
            }
        };
        debug!(source = %self.name(), "opened input");
        Ok(Numbers::new(reader, self.name()))
    }
}

/// A number together with where it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub line: usize,
}

/// Iterator over the numbers of one source, one per line.
///
/// Surrounding whitespace is ignored and `#` lines are comments. A blank line
/// is only accepted when nothing but blank or comment lines follow it.
/// The iterator stops after the first error.
pub struct Numbers<R> {
    reader: R,
    source_name: String,
    line: usize,
    first_blank: Option<usize>,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> Numbers<R> {
    pub fn new(reader: R, source_name: impl Into<String>) -> Numbers<R> {
        Numbers {
            reader,
            source_name: source_name.into(),
            line: 0,
            first_blank: None,
            buf: Vec::new(),
            done: false,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    fn parse_error(&self, line: usize, text: &str) -> CalcError {
        CalcError::Parse {
            source_name: self.source_name.clone(),
            line,
            text: text.to_string(),
        }
    }

    fn next_reading(&mut self) -> Result<Option<Reading>, CalcError> {
        loop {
            self.buf.clear();
            let read = self
                .reader
                .read_until(b'\n', &mut self.buf)
                .map_err(|source| CalcError::Io {
                    path: PathBuf::from(&self.source_name),
                    source,
                })?;
            if read == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = String::from_utf8_lossy(&self.buf);
            let text = text.trim();
            if text.is_empty() {
                self.first_blank.get_or_insert(self.line);
                continue;
            }
            if text.starts_with('#') {
                continue;
            }
            if let Some(blank) = self.first_blank {
                return Err(self.parse_error(blank, ""));
            }

            return match text.parse::<f64>() {
                Ok(value) => Ok(Some(Reading {
                    value,
                    line: self.line,
                })),
                Err(_) => Err(self.parse_error(self.line, text)),
            };
        }
    }
}

impl<R: BufRead> Iterator for Numbers<R> {
    type Item = Result<Reading, CalcError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_reading() {
            Ok(Some(reading)) => Some(Ok(reading)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Drains every opened source, in order, into memory.
pub fn collect<R, I>(inputs: I) -> Result<Vec<f64>, CalcError>
where
    R: BufRead,
    I: IntoIterator<Item = Result<Numbers<R>, CalcError>>,
{
    let mut values = Vec::new();
    for numbers in inputs {
        for reading in numbers? {
            values.push(reading?.value);
        }
    }
    debug!(count = values.len(), "read input");
    Ok(values)
}
