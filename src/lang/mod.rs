// src/lang/mod.rs

//! The command language: line parsing and the interpreter that folds a
//! stream of commands into an ordered operation sequence.

mod command;
mod interpreter;


pub use command::{Command, ParseError};
pub use interpreter::{Interpreter, MoveBinding};
