// ⚙️ Application Config - fixed per-domain settings
//
// The consoles take no flags and read no environment variables, so every
// setting is a constant chosen by the binary. Tests swap the data file.

use std::path::{Path, PathBuf};
use tracing::Level;

pub const INVENTORY_FILE: &str = "inventario.json";
pub const SALES_FILE: &str = "ventas.json";
pub const TASKS_FILE: &str = "tareas.json";
pub const BANK_FILE: &str = "cuentas_bancarias.json";

/// Settings for one interactive console.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Heading printed above the menu
    pub title: String,

    /// JSON document used by the save/load menu entries
    pub data_file: PathBuf,

    /// Most verbose level written to stderr
    pub log_level: Level,
}

impl AppConfig {
    fn new(title: &str, data_file: &str) -> Self {
        AppConfig {
            title: title.to_string(),
            data_file: PathBuf::from(data_file),
            log_level: Level::WARN,
        }
    }

    pub fn inventory() -> Self {
        Self::new("Sistema de gestión de productos", INVENTORY_FILE)
    }

    pub fn sales() -> Self {
        Self::new("Sistema de gestión de ventas", SALES_FILE)
    }

    pub fn tasks() -> Self {
        Self::new("Sistema de gestión de tareas", TASKS_FILE)
    }

    pub fn bank() -> Self {
        Self::new("Sistema de gestión de cuentas bancarias", BANK_FILE)
    }

    /// Builder pattern: point the console at another JSON document
    pub fn with_data_file(mut self, path: impl AsRef<Path>) -> Self {
        self.data_file = path.as_ref().to_path_buf();
        self
    }

    /// Builder pattern: change stderr verbosity
    pub fn with_log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }
}
