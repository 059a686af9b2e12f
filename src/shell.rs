// 🔁 Menu Shell - numbered-menu loop shared by the four consoles
//
// State machine with a single live state:
//
//   AwaitingChoice --(any entry, any error)--> AwaitingChoice
//   AwaitingChoice --(exit entry, EOF)-------> Terminated
//
// Each console supplies its entries and a handler; the exit entry is always
// appended last by the shell itself.

use crate::console::Console;
use crate::error::{RecordError, Result};
use std::io::{BufRead, Write};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    AwaitingChoice,
    Terminated,
}

/// One interactive console: a fixed list of entries and their handler.
pub trait Menu {
    /// Heading printed above the entries
    fn title(&self) -> &str;

    /// Entry labels, numbered from 1 (the exit entry is not included)
    fn entries(&self) -> &'static [&'static str];

    /// Run entry `choice` (1-based, never the exit entry).
    fn handle<R: BufRead, W: Write>(
        &mut self,
        choice: usize,
        console: &mut Console<R, W>,
    ) -> Result<()>;
}

/// Drive `menu` until the exit entry is chosen or input runs out.
///
/// Only failures to write to the console escape; every `RecordError` raised
/// by an entry is reported and the loop continues.
pub fn run<M: Menu, R: BufRead, W: Write>(
    menu: &mut M,
    console: &mut Console<R, W>,
) -> Result<ShellState> {
    let mut state = ShellState::AwaitingChoice;
    while state == ShellState::AwaitingChoice {
        state = step(menu, console)?;
    }
    Ok(state)
}

/// One transition: print the menu, read a choice, dispatch it.
pub fn step<M: Menu, R: BufRead, W: Write>(
    menu: &mut M,
    console: &mut Console<R, W>,
) -> Result<ShellState> {
    print_menu(menu, console)?;

    let raw = match console.prompt("Seleccione una opción: ") {
        Ok(raw) => raw,
        Err(RecordError::InputClosed) => return Ok(ShellState::Terminated),
        Err(e) => return Err(e),
    };

    let exit_choice = menu.entries().len() + 1;
    let choice = raw
        .parse::<usize>()
        .ok()
        .filter(|c| (1..=exit_choice).contains(c));

    match choice {
        None => {
            console.say("Opción no válida")?;
            Ok(ShellState::AwaitingChoice)
        }
        Some(c) if c == exit_choice => {
            debug!(menu = menu.title(), "exit chosen");
            Ok(ShellState::Terminated)
        }
        Some(c) => match menu.handle(c, console) {
            Ok(()) => Ok(ShellState::AwaitingChoice),
            Err(e) => report(e, console),
        },
    }
}

fn print_menu<M: Menu, R: BufRead, W: Write>(
    menu: &M,
    console: &mut Console<R, W>,
) -> Result<()> {
    console.say("")?;
    console.say(format!("== {} ==", menu.title()))?;
    for (idx, entry) in menu.entries().iter().enumerate() {
        console.say(format!("{}. {}", idx + 1, entry))?;
    }
    console.say(format!("{}. Salir", menu.entries().len() + 1))
}

fn report<R: BufRead, W: Write>(
    err: RecordError,
    console: &mut Console<R, W>,
) -> Result<ShellState> {
    debug!(error = %err, "entry failed");

    match err {
        RecordError::InvalidInput(message) => {
            console.say(format!("Error: {message}"))?;
        }
        RecordError::NotFound(key) => {
            console.say(format!("Error: no existe ningún registro «{key}»"))?;
        }
        RecordError::IndexOutOfRange { .. } => {
            console.say(format!("Error: {err}"))?;
        }
        RecordError::InsufficientFunds { .. } => {
            console.say(format!("Error: {err}"))?;
        }
        RecordError::Io { .. } | RecordError::Malformed { .. } => {
            console.say(format!("Error de archivo: {err}"))?;
            console.say("Los datos en memoria no se modificaron")?;
        }
        RecordError::InputClosed => return Ok(ShellState::Terminated),
    }

    Ok(ShellState::AwaitingChoice)
}
