// Interactive consoles - one `Menu` per record family
//
// Each console owns its collection manager and the config naming its JSON
// file. The binaries only pick a config and call `launch`.

pub mod inventory;
pub mod sales;
pub mod tasks;
pub mod bank;

pub use bank::BankApp;
pub use inventory::InventoryApp;
pub use sales::SalesApp;
pub use tasks::TasksApp;

use crate::config::AppConfig;
use crate::console::Console;
use crate::error::{RecordError, Result};
use crate::logging;
use crate::shell::{self, Menu};
use anyhow::Context;
use std::io::{BufRead, Write};
use tracing::info;

/// Run `app` on stdin/stdout until the user exits.
pub fn launch<M: Menu>(config: &AppConfig, mut app: M) -> anyhow::Result<()> {
    logging::init(config);
    info!(title = %config.title, data_file = %config.data_file.display(), "console started");

    let mut console = Console::stdio();
    shell::run(&mut app, &mut console)
        .with_context(|| format!("{}: console I/O failed", config.title))?;

    info!(title = %config.title, "console closed");
    Ok(())
}

/// Ask which of the two variants to create: `1` → first, `2` → second.
pub(crate) fn prompt_variant<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    label: &str,
    what: &str,
) -> Result<bool> {
    match console.prompt(label)?.as_str() {
        "1" => Ok(true),
        "2" => Ok(false),
        other => Err(RecordError::invalid(format!("tipo de {what} no válido: '{other}'"))),
    }
}

/// Tell the user how a load went, including dropped elements.
pub(crate) fn report_load<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    message: &str,
    loaded: usize,
    skipped: usize,
) -> Result<()> {
    console.say(format!("{message} ({loaded} registro(s))"))?;
    if skipped > 0 {
        console.say(format!(
            "Aviso: {skipped} registro(s) omitido(s) por ser no reconocido(s) o mal formado(s)"
        ))?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::console::Console;
    use crate::shell::{self, Menu, ShellState};
    use std::io::Cursor;

    /// Feed `input` to the menu loop and return everything it printed.
    pub fn drive<M: Menu>(app: &mut M, input: &str) -> String {
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let state = shell::run(app, &mut console).unwrap();
        assert_eq!(state, ShellState::Terminated);
        String::from_utf8(console.into_output()).unwrap()
    }
}
