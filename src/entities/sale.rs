// 🧾 Sale Entity - sales ledger addressed by position
//
// Every sale has a timestamp, a customer and its line items. Online sales
// ship to an address and pay a flat shipping fee; local sales record the
// branch where they happened.

use crate::error::{RecordError, Result};
use crate::store::{self, LoadReport};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

pub const ONLINE_TAG: &str = "VentaOnline";
pub const LOCAL_TAG: &str = "VentaLocal";

/// Flat fee added to every online sale
pub const SHIPPING_FEE: f64 = 5.0;

/// Format of the `fecha` stamp
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// LINE ITEM
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "precio")]
    pub price: f64,
}

impl LineItem {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        LineItem {
            name: name.into(),
            price,
        }
    }
}

// ============================================================================
// SALE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo")]
pub enum SaleKind {
    #[serde(rename = "VentaOnline")]
    Online {
        #[serde(rename = "direccion_envio")]
        shipping_address: String,
    },

    #[serde(rename = "VentaLocal")]
    Local {
        #[serde(rename = "sucursal")]
        branch: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// When the sale was registered (`DATE_FORMAT`)
    #[serde(rename = "fecha")]
    pub date: String,

    #[serde(rename = "cliente")]
    pub customer: String,

    #[serde(rename = "productos")]
    pub items: Vec<LineItem>,

    #[serde(flatten)]
    pub kind: SaleKind,
}

impl Sale {
    pub fn online(date: String, customer: String, items: Vec<LineItem>, shipping_address: String) -> Self {
        Sale {
            date,
            customer,
            items,
            kind: SaleKind::Online { shipping_address },
        }
    }

    pub fn local(date: String, customer: String, items: Vec<LineItem>, branch: String) -> Self {
        Sale {
            date,
            customer,
            items,
            kind: SaleKind::Local { branch },
        }
    }

    /// Current local time in `DATE_FORMAT`
    pub fn timestamp_now() -> String {
        Local::now().format(DATE_FORMAT).to_string()
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            SaleKind::Online { .. } => ONLINE_TAG,
            SaleKind::Local { .. } => LOCAL_TAG,
        }
    }

    /// Sum of item prices, plus `SHIPPING_FEE` for online sales
    pub fn total(&self) -> f64 {
        let items: f64 = self.items.iter().map(|i| i.price).sum();
        match self.kind {
            SaleKind::Online { .. } => items + SHIPPING_FEE,
            SaleKind::Local { .. } => items,
        }
    }

    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Sale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = self
            .items
            .iter()
            .map(|i| format!("{} (${})", i.name, i.price))
            .collect::<Vec<_>>()
            .join(", ");

        match &self.kind {
            SaleKind::Online { shipping_address } => write!(
                f,
                "Venta Online - Fecha: {}, Cliente: {}, Productos: [{}], Total: ${}, Envío a: {}",
                self.date,
                self.customer,
                items,
                self.total(),
                shipping_address
            ),
            SaleKind::Local { branch } => write!(
                f,
                "Venta Local - Fecha: {}, Cliente: {}, Productos: [{}], Total: ${}, Sucursal: {}",
                self.date,
                self.customer,
                items,
                self.total(),
                branch
            ),
        }
    }
}

/// Sparse update for a sale. Variant fields only apply to their own variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalePatch {
    pub customer: Option<String>,
    pub shipping_address: Option<String>,
    pub branch: Option<String>,
}

impl SalePatch {
    pub fn apply(&self, sale: &mut Sale) {
        if let Some(customer) = &self.customer {
            sale.customer = customer.clone();
        }
        match &mut sale.kind {
            SaleKind::Online { shipping_address } => {
                if let Some(address) = &self.shipping_address {
                    *shipping_address = address.clone();
                }
            }
            SaleKind::Local { branch } => {
                if let Some(new_branch) = &self.branch {
                    *branch = new_branch.clone();
                }
            }
        }
    }
}

// ============================================================================
// SALES LEDGER
// ============================================================================

/// Ordered sales; positions shift down when an earlier sale is removed.
#[derive(Debug, Clone, Default)]
pub struct SalesLedger {
    sales: Vec<Sale>,
}

impl SalesLedger {
    pub fn new() -> Self {
        SalesLedger { sales: Vec::new() }
    }

    pub fn add(&mut self, sale: Sale) {
        debug!(customer = %sale.customer, kind = sale.kind_name(), "sale added");
        self.sales.push(sale);
    }

    /// Remove and return the sale at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Sale> {
        self.check_index(index)?;
        let removed = self.sales.remove(index);
        debug!(index, "sale removed");
        Ok(removed)
    }

    pub fn update(&mut self, index: usize, patch: &SalePatch) -> Result<()> {
        let len = self.sales.len();
        let sale = self
            .sales
            .get_mut(index)
            .ok_or(RecordError::IndexOutOfRange { index, len })?;
        patch.apply(sale);
        debug!(index, "sale updated");
        Ok(())
    }

    pub fn find(&self, index: usize) -> Option<&Sale> {
        self.sales.get(index)
    }

    /// All sales in insertion order
    pub fn list(&self) -> std::slice::Iter<'_, Sale> {
        self.sales.iter()
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        store::save_records(path, &self.sales)
    }

    /// Replace the ledger with the file's contents; returns the skipped count.
    pub fn load_from_file(&mut self, path: &Path) -> Result<usize> {
        let LoadReport { records, skipped } = store::load_records(path)?;
        self.sales = records;
        Ok(skipped)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.sales.len() {
            Ok(())
        } else {
            Err(RecordError::IndexOutOfRange {
                index,
                len: self.sales.len(),
            })
        }
    }
}
