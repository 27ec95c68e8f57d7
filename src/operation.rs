use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;

/// Whether an operation maps every number or folds the whole stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// One output line per input number, emitted as input arrives.
    Streaming,
    /// One aggregate value or report after the whole stream is read.
    Reducing,
    /// Reads no input at all.
    Informational,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Cumprod,
    Cumsum,
    Exp,
    Help,
    Hist,
    Log,
    Max,
    Mean,
    MeanVar,
    Median,
    Min,
    Print,
    Prod,
    Sqrt,
    Std,
    Sum,
    Summary,
    Var,
}

impl Operation {
    /// Every operation, sorted by name.
    pub const ALL: [Operation; 19] = [
        Operation::Add,
        Operation::Cumprod,
        Operation::Cumsum,
        Operation::Exp,
        Operation::Help,
        Operation::Hist,
        Operation::Log,
        Operation::Max,
        Operation::Mean,
        Operation::MeanVar,
        Operation::Median,
        Operation::Min,
        Operation::Print,
        Operation::Prod,
        Operation::Sqrt,
        Operation::Std,
        Operation::Sum,
        Operation::Summary,
        Operation::Var,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Cumprod => "cumprod",
            Operation::Cumsum => "cumsum",
            Operation::Exp => "exp",
            Operation::Help => "help",
            Operation::Hist => "hist",
            Operation::Log => "log",
            Operation::Max => "max",
            Operation::Mean => "mean",
            Operation::MeanVar => "mean_var",
            Operation::Median => "median",
            Operation::Min => "min",
            Operation::Print => "print",
            Operation::Prod => "prod",
            Operation::Sqrt => "sqrt",
            Operation::Std => "std",
            Operation::Sum => "sum",
            Operation::Summary => "summary",
            Operation::Var => "var",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Operation::Add => "see sum",
            Operation::Cumprod => "Cumulative product",
            Operation::Cumsum => "Cumulative sum",
            Operation::Exp => "Exponentiate every element in the list",
            Operation::Help => "Print this message",
            Operation::Hist => "Produce a histogram (optional bin count, default 10)",
            Operation::Log => "Take the natural log of every element in the list",
            Operation::Max => "Max",
            Operation::Mean => "Mean",
            Operation::MeanVar => "Computes mean & variance with one pass",
            Operation::Median => "Median",
            Operation::Min => "Min",
            Operation::Print => "Just print the (cleaned) input",
            Operation::Prod => "Multiply a list of numbers",
            Operation::Sqrt => "Square root of every element in the list",
            Operation::Std => "Standard deviation",
            Operation::Sum => "Add a list of numbers",
            Operation::Summary => "Summary statistics (reads the whole input)",
            Operation::Var => "Variance",
        }
    }

    pub fn kind(self) -> Kind {
        match self {
            Operation::Exp
            | Operation::Log
            | Operation::Sqrt
            | Operation::Cumsum
            | Operation::Cumprod
            | Operation::Print => Kind::Streaming,
            Operation::Add
            | Operation::Hist
            | Operation::Max
            | Operation::Mean
            | Operation::MeanVar
            | Operation::Median
            | Operation::Min
            | Operation::Prod
            | Operation::Std
            | Operation::Sum
            | Operation::Summary
            | Operation::Var => Kind::Reducing,
            Operation::Help => Kind::Informational,
        }
    }

    pub fn names() -> Vec<&'static str> {
        Operation::ALL.iter().map(|op| op.name()).collect()
    }

    /// One `\tname\thelp` line per operation.
    pub fn command_list() -> String {
        Operation::ALL
            .iter()
            .map(|op| format!("\t{}\t{}", op.name(), op.help()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| CalcError::UnknownOperation {
                name: s.to_string(),
                valid: Operation::names(),
            })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
