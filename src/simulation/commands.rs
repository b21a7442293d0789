//! Commands submitted by the front end between steps.
//!
//! Front ends push commands into a [`CommandQueue`] while a frame is handled;
//! the simulation drains and applies them serially before the next step.

use serde::{Deserialize, Serialize};

use super::geometric_utils::Cell;
use super::observer::Direction;

/// A discrete request from the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Move the observer one cell.
    Move(Direction),
    /// Toggle a campfire at the observer's current position.
    ToggleCampfireHere,
    /// Toggle a campfire at an explicit cell.
    ToggleCampfireAt(Cell),
}

impl Command {
    /// Parses a single script character: `U`, `D`, `L`, `R` move, `C` toggles a
    /// campfire at the observer. Other characters yield `None`.
    pub fn from_script_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'U' => Some(Self::Move(Direction::Up)),
            'D' => Some(Self::Move(Direction::Down)),
            'L' => Some(Self::Move(Direction::Left)),
            'R' => Some(Self::Move(Direction::Right)),
            'C' => Some(Self::ToggleCampfireHere),
            _ => None,
        }
    }
}

/// FIFO queue of pending commands.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    /// Creates an empty command queue.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Adds a command to the queue.
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Number of pending commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no commands are pending.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drains all commands in submission order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, Command> {
        self.commands.drain(..)
    }
}
