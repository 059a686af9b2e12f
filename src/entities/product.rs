// 📦 Product Entity - stock items keyed by name
//
// Two variants share name/price/quantity:
// - Electronic: brand + warranty in months
// - Food: expiry date
//
// Files written here carry an explicit `tipo`. Files from before that field
// existed are still accepted: `marca` means electronic, `fecha_caducidad`
// means food.

use crate::error::Result;
use crate::store::{self, LoadReport};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use tracing::debug;

pub const ELECTRONIC_TAG: &str = "ProductoElectronico";
pub const FOOD_TAG: &str = "ProductoAlimenticio";

// ============================================================================
// PRODUCT
// ============================================================================

/// Variant-specific product data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo")]
pub enum ProductKind {
    #[serde(rename = "ProductoElectronico")]
    Electronic {
        #[serde(rename = "marca")]
        brand: String,
        #[serde(rename = "garantia")]
        warranty_months: u32,
    },

    #[serde(rename = "ProductoAlimenticio")]
    Food {
        #[serde(rename = "fecha_caducidad")]
        expiry_date: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique key within an inventory (by convention, not enforced)
    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "precio")]
    pub price: f64,

    #[serde(rename = "cantidad")]
    pub quantity: u32,

    #[serde(flatten)]
    pub kind: ProductKind,
}

impl Product {
    pub fn electronic(
        name: String,
        price: f64,
        quantity: u32,
        brand: String,
        warranty_months: u32,
    ) -> Self {
        Product {
            name,
            price,
            quantity,
            kind: ProductKind::Electronic {
                brand,
                warranty_months,
            },
        }
    }

    pub fn food(name: String, price: f64, quantity: u32, expiry_date: String) -> Self {
        Product {
            name,
            price,
            quantity,
            kind: ProductKind::Food { expiry_date },
        }
    }

    /// Serialized `tipo` of this product's variant
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ProductKind::Electronic { .. } => ELECTRONIC_TAG,
            ProductKind::Food { .. } => FOOD_TAG,
        }
    }

    /// One-line summary with every field
    pub fn description(&self) -> String {
        self.to_string()
    }

    /// Decode one JSON element, inferring `tipo` from legacy field names when absent.
    pub fn from_json(mut value: Value) -> std::result::Result<Product, serde_json::Error> {
        if let Value::Object(map) = &mut value {
            if !map.contains_key("tipo") {
                let inferred = if map.contains_key("marca") {
                    Some(ELECTRONIC_TAG)
                } else if map.contains_key("fecha_caducidad") {
                    Some(FOOD_TAG)
                } else {
                    None
                };
                if let Some(tag) = inferred {
                    map.insert("tipo".to_string(), Value::from(tag));
                }
            }
        }
        serde_json::from_value(value)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ProductKind::Electronic {
                brand,
                warranty_months,
            } => write!(
                f,
                "Producto electrónico: {}, Precio: ${}, Cantidad: {}, Marca: {}, Garantía: {} meses",
                self.name, self.price, self.quantity, brand, warranty_months
            ),
            ProductKind::Food { expiry_date } => write!(
                f,
                "Producto alimenticio: {}, Precio: ${}, Cantidad: {}, Fecha de caducidad: {}",
                self.name, self.price, self.quantity, expiry_date
            ),
        }
    }
}

/// Sparse update for a product; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub price: Option<f64>,
    pub quantity: Option<u32>,
}

impl ProductPatch {
    pub fn apply(&self, product: &mut Product) {
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
    }
}

// ============================================================================
// INVENTORY
// ============================================================================

/// Ordered product collection addressed by name.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    products: Vec<Product>,
}

impl Inventory {
    pub fn new() -> Self {
        Inventory {
            products: Vec::new(),
        }
    }

    /// Append a product; duplicates by name are allowed.
    pub fn add(&mut self, product: Product) {
        debug!(name = %product.name, kind = product.kind_name(), "product added");
        self.products.push(product);
    }

    /// Remove every product named `name`, returning how many went away.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.products.len();
        self.products.retain(|p| p.name != name);
        let removed = before - self.products.len();
        debug!(name, removed, "products removed");
        removed
    }

    /// Patch every product named `name`.
    ///
    /// An unknown name leaves the inventory untouched and returns `false`.
    pub fn update(&mut self, name: &str, patch: &ProductPatch) -> bool {
        let mut found = false;
        for product in self.products.iter_mut().filter(|p| p.name == name) {
            patch.apply(product);
            found = true;
        }
        debug!(name, found, "product update");
        found
    }

    /// First product named `name`
    pub fn find(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// All products in insertion order
    pub fn list(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        store::save_records(path, &self.products)
    }

    /// Replace the inventory with the file's contents.
    ///
    /// On `Io`/`Malformed` the current products are kept. Returns the number
    /// of elements that were skipped as unrecognized.
    pub fn load_from_file(&mut self, path: &Path) -> Result<usize> {
        let LoadReport { records, skipped } = store::load_records_with(path, Product::from_json)?;
        self.products = records;
        Ok(skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;
    use std::fs;

    fn tv() -> Product {
        Product::electronic("TV".to_string(), 500.0, 2, "Acme".to_string(), 12)
    }

    fn milk() -> Product {
        Product::food("Milk".to_string(), 2.0, 10, "2024-06-01".to_string())
    }

    #[test]
    fn test_descriptions_include_every_field() {
        let tv = tv().description();
        for part in ["TV", "500", "2", "Acme", "12"] {
            assert!(tv.contains(part), "missing {part} in {tv}");
        }
        assert!(tv.starts_with("Producto electrónico"));

        let milk = milk().description();
        for part in ["Milk", "2", "10", "2024-06-01"] {
            assert!(milk.contains(part), "missing {part} in {milk}");
        }
        assert!(milk.starts_with("Producto alimenticio"));
    }

    #[test]
    fn test_serialized_shape_is_flat_with_tipo() {
        let value = serde_json::to_value(tv()).unwrap();
        assert_eq!(value["nombre"], "TV");
        assert_eq!(value["precio"], 500.0);
        assert_eq!(value["cantidad"], 2);
        assert_eq!(value["marca"], "Acme");
        assert_eq!(value["garantia"], 12);
        assert_eq!(value["tipo"], "ProductoElectronico");

        let value = serde_json::to_value(milk()).unwrap();
        assert_eq!(value["fecha_caducidad"], "2024-06-01");
        assert_eq!(value["tipo"], "ProductoAlimenticio");
        assert!(value.get("marca").is_none());
    }

    #[test]
    fn test_legacy_structural_format_loads() {
        let legacy = serde_json::json!({
            "nombre": "Radio", "precio": 30, "cantidad": 4, "marca": "Sony", "garantia": 6
        });
        let product = Product::from_json(legacy).unwrap();
        assert_eq!(product.kind_name(), ELECTRONIC_TAG);
        assert_eq!(product.price, 30.0);

        let legacy = serde_json::json!({
            "nombre": "Pan", "precio": 1.5, "cantidad": 20, "fecha_caducidad": "2024-02-02"
        });
        let product = Product::from_json(legacy).unwrap();
        assert_eq!(product.kind_name(), FOOD_TAG);

        let unknown = serde_json::json!({"nombre": "X", "precio": 1, "cantidad": 1});
        assert!(Product::from_json(unknown).is_err());
    }

    #[test]
    fn test_update_unknown_name_is_noop() {
        let mut inventory = Inventory::new();
        inventory.add(tv());
        inventory.add(milk());

        let patch = ProductPatch {
            price: Some(1.0),
            quantity: Some(1),
        };
        assert!(!inventory.update("Radio", &patch));

        let snapshot: Vec<Product> = inventory.list().cloned().collect();
        assert_eq!(snapshot, vec![tv(), milk()]);
    }

    #[test]
    fn test_update_changes_only_named_fields() {
        let mut inventory = Inventory::new();
        inventory.add(tv());
        inventory.add(milk());

        let patch = ProductPatch {
            price: Some(450.0),
            quantity: None,
        };
        assert!(inventory.update("TV", &patch));

        let updated = inventory.find("TV").unwrap();
        assert_eq!(updated.price, 450.0);
        assert_eq!(updated.quantity, 2);
        assert_eq!(
            updated.kind,
            ProductKind::Electronic {
                brand: "Acme".to_string(),
                warranty_months: 12
            }
        );
        assert_eq!(inventory.find("Milk"), Some(&milk()));
    }

    #[test]
    fn test_remove_by_name_removes_all_matches() {
        let mut inventory = Inventory::new();
        inventory.add(tv());
        inventory.add(milk());
        inventory.add(tv());

        assert_eq!(inventory.remove("TV"), 2);
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.remove("TV"), 0);
        assert!(inventory.find("TV").is_none());
    }

    #[test]
    fn test_find_returns_first_match() {
        let mut inventory = Inventory::new();
        let mut second = tv();
        second.price = 999.0;
        inventory.add(tv());
        inventory.add(second);

        assert_eq!(inventory.find("TV").unwrap().price, 500.0);
        assert!(inventory.find("tv").is_none());
    }

    #[test]
    fn test_save_then_load_into_fresh_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventario.json");

        let mut inventory = Inventory::new();
        inventory.add(tv());
        inventory.add(milk());
        inventory.save_to_file(&path).unwrap();

        let mut fresh = Inventory::new();
        let skipped = fresh.load_from_file(&path).unwrap();
        assert_eq!(skipped, 0);

        let loaded: Vec<Product> = fresh.list().cloned().collect();
        assert_eq!(loaded, vec![tv(), milk()]);
    }

    #[test]
    fn test_load_skips_unrecognized_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventario.json");
        fs::write(
            &path,
            r#"[
                {"nombre": "TV", "precio": 500, "cantidad": 2, "marca": "Acme", "garantia": 12},
                {"nombre": "Misterio", "precio": 1, "cantidad": 1},
                {"nombre": "Silla", "precio": 40, "cantidad": 3, "tipo": "Mueble"},
                {"nombre": "Milk", "precio": 2, "cantidad": 10, "fecha_caducidad": "2024-06-01"}
            ]"#,
        )
        .unwrap();

        let mut inventory = Inventory::new();
        let skipped = inventory.load_from_file(&path).unwrap();
        assert_eq!(skipped, 2);
        assert_eq!(inventory.list().cloned().collect::<Vec<_>>(), vec![tv(), milk()]);
    }

    #[test]
    fn test_failed_load_keeps_current_products() {
        let dir = tempfile::tempdir().unwrap();
        let mut inventory = Inventory::new();
        inventory.add(tv());

        let missing = dir.path().join("missing.json");
        let err = inventory.load_from_file(&missing).unwrap_err();
        assert!(matches!(err, RecordError::Io { .. }));
        assert_eq!(inventory.len(), 1);

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "[{\"nombre\": ").unwrap();
        let err = inventory.load_from_file(&broken).unwrap_err();
        assert!(matches!(err, RecordError::Malformed { .. }));
        assert_eq!(inventory.find("TV"), Some(&tv()));
    }
}
