// Entity Models - one record family per console
//
// Each module holds:
// - the record (shared fields + a two-variant kind, serialized with `tipo`)
// - a sparse patch type for updates
// - the ordered collection manager with JSON load/save

pub mod product;
pub mod sale;
pub mod task;
pub mod account;

pub use product::{Inventory, Product, ProductKind, ProductPatch};
pub use sale::{LineItem, Sale, SaleKind, SalePatch, SalesLedger};
pub use task::{Task, TaskBoard, TaskKind, TaskPatch, TaskStatus};
pub use account::{Account, AccountKind, AccountPatch, AccountRegistry};
