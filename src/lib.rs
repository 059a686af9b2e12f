// Record Desk - Core Library
// Four menu-driven record consoles (inventory, sales, tasks, bank accounts)
// sharing one error type, one JSON store and one menu loop.

pub mod error;
pub mod config;
pub mod logging;
pub mod store;
pub mod console;
pub mod shell;
pub mod entities;
pub mod apps;

// Re-export commonly used types
pub use error::{RecordError, Result};
pub use config::AppConfig;
pub use store::LoadReport;
pub use console::Console;
pub use shell::{Menu, ShellState};
pub use entities::{
    Product, ProductKind, ProductPatch, Inventory,
    Sale, SaleKind, SalePatch, LineItem, SalesLedger,
    Task, TaskKind, TaskPatch, TaskStatus, TaskBoard,
    Account, AccountKind, AccountPatch, AccountRegistry,
};
pub use apps::{InventoryApp, SalesApp, TasksApp, BankApp};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
