// src/lang/command.rs

//! Defines the `Command` enum, one parsed line of the command language, and
//! the errors a line can fail with.

use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    /// The first token is not an instruction (this includes blank lines).
    #[error("could not parse command {line}")]
    UnknownInstruction { line: String },
    /// Fewer integer arguments survived filtering than the instruction reads.
    #[error("instruction `{instruction}` needs {expected} integer arguments, found {found}: {line}")]
    MissingArguments {
        instruction: &'static str,
        expected: usize,
        found: usize,
        line: String,
    },
    /// An integer argument does not fit the 32-bit coordinate range.
    #[error("instruction `{instruction}` argument {value} is out of range: {line}")]
    ArgumentOutOfRange {
        instruction: &'static str,
        value: i64,
        line: String,
    },
    #[error("failed to read command stream: {0}")]
    Io(#[from] std::io::Error),
}

/// One instruction of the command language with its positional arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Solid white background.
    White,
    /// Solid green background.
    Green,
    /// Black background rectangle.
    BgRect { x1: i32, y1: i32, x2: i32, y2: i32 },
    /// Place a figure.
    Figure { x: i32, y: i32 },
    /// Translate figures.
    Move { dx: i32, dy: i32 },
    /// Drop all accumulated state.
    Reset,
    /// Present the result.
    Update,
}

impl FromStr for Command {
    type Err = ParseError;

    /// Splits on whitespace; the first token names the instruction. Argument
    /// tokens that are not 64-bit integers are dropped before the remaining
    /// integers are consumed positionally. Surplus integers are ignored; an
    /// integer outside the `i32` range is an error.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let instruction = tokens.next().unwrap_or_default();
        let args = Args {
            ints: tokens.filter_map(|t| t.parse().ok()).collect(),
            line,
        };

        let command = match instruction {
            "white" => Command::White,
            "green" => Command::Green,
            "bgrect" => {
                let [x1, y1, x2, y2] = args.take("bgrect")?;
                Command::BgRect { x1, y1, x2, y2 }
            }
            "figure" => {
                let [x, y] = args.take("figure")?;
                Command::Figure { x, y }
            }
            "move" => {
                let [dx, dy] = args.take("move")?;
                Command::Move { dx, dy }
            }
            "reset" => Command::Reset,
            "update" => Command::Update,
            _ => {
                return Err(ParseError::UnknownInstruction {
                    line: line.to_string(),
                })
            }
        };
        Ok(command)
    }
}

struct Args<'a> {
    ints: Vec<i64>,
    line: &'a str,
}

impl Args<'_> {
    fn take<const N: usize>(&self, instruction: &'static str) -> Result<[i32; N], ParseError> {
        let wide = self
            .ints
            .get(..N)
            .ok_or_else(|| ParseError::MissingArguments {
                instruction,
                expected: N,
                found: self.ints.len(),
                line: self.line.to_string(),
            })?;

        let mut args = [0; N];
        for (arg, &value) in args.iter_mut().zip(wide) {
            *arg = i32::try_from(value).map_err(|_| ParseError::ArgumentOutOfRange {
                instruction,
                value,
                line: self.line.to_string(),
            })?;
        }
        Ok(args)
    }
}
