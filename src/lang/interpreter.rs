// src/lang/interpreter.rs

use super::command::{Command, ParseError};
use crate::geometry::Rect;
use crate::painter::{Figure, FigureSet, FigureStamp, Operation, Translate};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// Which figures a `move` translates when it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveBinding {
    /// Every figure of the batch that issued the `move`, including figures
    /// placed after it within that batch. Figures from later batches are
    /// never affected, however far the painter lags behind.
    #[default]
    Live,
    /// Only the figures that existed when the `move` was issued.
    Snapshot,
}

/// Accumulated drawing state of one interpreter session.
#[derive(Debug)]
struct InterpreterState {
    /// Pending background: a fill, or the implicit reset.
    background: Operation,
    background_rect: Option<Rect>,
    figures: FigureSet,
    pending_moves: Vec<Translate>,
    refresh: bool,
}

impl Default for InterpreterState {
    fn default() -> Self {
        InterpreterState {
            background: Operation::Reset,
            background_rect: None,
            figures: FigureSet::new(),
            pending_moves: Vec::new(),
            refresh: false,
        }
    }
}

/// Turns command lines into finalized operation sequences.
///
/// Background, background rectangle and figures carry over from one batch
/// to the next until a `reset`; moves and the forced redraw belong to the
/// batch that issued them.
#[derive(Debug, Default)]
pub struct Interpreter {
    state: InterpreterState,
    move_binding: MoveBinding,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_move_binding(move_binding: MoveBinding) -> Self {
        Interpreter {
            state: InterpreterState::default(),
            move_binding,
        }
    }

    pub fn move_binding(&self) -> MoveBinding {
        self.move_binding
    }

    /// Reads a whole batch from `input` and returns its finalized sequence.
    pub fn parse_stream<R: BufRead>(&mut self, input: R) -> Result<Vec<Operation>, ParseError> {
        let lines = input.lines().collect::<Result<Vec<_>, _>>()?;
        self.parse_lines(lines.iter().map(String::as_str))
    }

    /// Interprets a batch of lines and returns its finalized sequence:
    /// background, background rectangle, moves, figures, forced redraw.
    ///
    /// Every line is parsed before any is applied, so on error neither an
    /// operation list nor any state change results.
    pub fn parse_lines<'a, I>(&mut self, lines: I) -> Result<Vec<Operation>, ParseError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let commands = lines
            .into_iter()
            .map(str::parse)
            .collect::<Result<Vec<Command>, _>>()?;

        self.state.refresh = false;
        for command in commands {
            self.apply(command);
        }
        Ok(self.finalize())
    }

    /// Parses one line and applies it to the session state.
    pub fn parse_line(&mut self, line: &str) -> Result<(), ParseError> {
        let command = line.parse()?;
        self.apply(command);
        Ok(())
    }

    /// Applies an already parsed command to the session state.
    pub fn apply(&mut self, command: Command) {
        trace!("Interpreter: {:?}", command);
        let state = &mut self.state;
        match command {
            Command::White => state.background = Operation::white_fill(),
            Command::Green => state.background = Operation::green_fill(),
            Command::BgRect { x1, y1, x2, y2 } => {
                state.background_rect = Some(Rect::new(x1, y1, x2, y2));
            }
            Command::Figure { x, y } => {
                state.figures.push(Figure::new(x, y));
            }
            Command::Move { dx, dy } => {
                let figures = state.figures.clone();
                let translate = match self.move_binding {
                    MoveBinding::Live => Translate::live(figures, dx, dy),
                    MoveBinding::Snapshot => Translate::snapshot(figures, dx, dy),
                };
                state.pending_moves.push(translate);
            }
            Command::Reset => {
                *state = InterpreterState::default();
            }
            Command::Update => state.refresh = true,
        }
    }

    fn finalize(&mut self) -> Vec<Operation> {
        let state = &mut self.state;
        let figure_count = state.figures.len();
        let mut ops = Vec::with_capacity(3 + state.pending_moves.len() + figure_count);

        ops.push(state.background.clone());
        if let Some(rect) = state.background_rect {
            ops.push(Operation::BgRect(rect));
        }
        ops.extend(
            state
                .pending_moves
                .drain(..)
                .map(|translate| Operation::Move(translate.bounded(figure_count))),
        );
        ops.extend(
            (0..figure_count).map(|i| Operation::Figure(FigureStamp::new(state.figures.clone(), i))),
        );
        if state.refresh {
            ops.push(Operation::Update);
        }

        debug!(
            "Interpreter: Finalized {} operations ({} figures)",
            ops.len(),
            figure_count
        );
        ops
    }
}
