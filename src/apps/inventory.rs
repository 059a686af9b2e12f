// 📦 Inventory console

use super::{prompt_variant, report_load};
use crate::config::AppConfig;
use crate::console::Console;
use crate::entities::product::{Inventory, Product, ProductPatch};
use crate::error::{RecordError, Result};
use crate::shell::Menu;
use std::io::{BufRead, Write};

const ENTRIES: &[&str] = &[
    "Agregar producto",
    "Eliminar producto",
    "Actualizar producto",
    "Buscar producto",
    "Mostrar todos los productos",
    "Guardar en JSON",
    "Cargar desde JSON",
];

pub struct InventoryApp {
    config: AppConfig,
    inventory: Inventory,
}

impl InventoryApp {
    pub fn new(config: AppConfig) -> Self {
        InventoryApp {
            config,
            inventory: Inventory::new(),
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    fn add<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let electronic = prompt_variant(
            console,
            "Tipo de producto (1: Electrónico, 2: Alimenticio): ",
            "producto",
        )?;
        let name = console.prompt("Nombre: ")?;
        let price = console.prompt_amount("Precio: ")?;
        let quantity: u32 = console.prompt_parsed("Cantidad: ")?;

        let product = if electronic {
            let brand = console.prompt("Marca: ")?;
            let warranty: u32 = console.prompt_parsed("Garantía (meses): ")?;
            Product::electronic(name, price, quantity, brand, warranty)
        } else {
            let expiry = console.prompt("Fecha de caducidad: ")?;
            Product::food(name, price, quantity, expiry)
        };

        self.inventory.add(product);
        console.say("Producto agregado con éxito")
    }

    fn remove<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let name = console.prompt("Nombre del producto a eliminar: ")?;
        if self.inventory.remove(&name) > 0 {
            console.say("Producto eliminado con éxito")
        } else {
            console.say("Producto no encontrado")
        }
    }

    fn update<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let name = console.prompt("Nombre del producto a actualizar: ")?;
        let patch = ProductPatch {
            price: Some(console.prompt_amount("Nuevo precio: ")?),
            quantity: Some(console.prompt_parsed("Nueva cantidad: ")?),
        };

        if self.inventory.update(&name, &patch) {
            console.say("Producto actualizado con éxito")
        } else {
            console.say("Producto no encontrado")
        }
    }

    fn find<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        let name = console.prompt("Nombre del producto a buscar: ")?;
        match self.inventory.find(&name) {
            Some(product) => console.say(product),
            None => console.say("Producto no encontrado"),
        }
    }

    fn list<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        if self.inventory.is_empty() {
            return console.say("No hay productos");
        }
        for product in self.inventory.list() {
            console.say(product)?;
        }
        Ok(())
    }
}

impl Menu for InventoryApp {
    fn title(&self) -> &str {
        &self.config.title
    }

    fn entries(&self) -> &'static [&'static str] {
        ENTRIES
    }

    fn handle<R: BufRead, W: Write>(
        &mut self,
        choice: usize,
        console: &mut Console<R, W>,
    ) -> Result<()> {
        match choice {
            1 => self.add(console),
            2 => self.remove(console),
            3 => self.update(console),
            4 => self.find(console),
            5 => self.list(console),
            6 => {
                self.inventory.save_to_file(&self.config.data_file)?;
                console.say("Inventario guardado en JSON")
            }
            7 => {
                let skipped = self.inventory.load_from_file(&self.config.data_file)?;
                report_load(console, "Inventario cargado desde JSON", self.inventory.len(), skipped)
            }
            other => Err(RecordError::invalid(format!("opción {other} no existe"))),
        }
    }
}
