// 🧾 Sales console

use super::{prompt_variant, report_load};
use crate::config::AppConfig;
use crate::console::Console;
use crate::entities::sale::{LineItem, Sale, SaleKind, SalePatch, SalesLedger};
use crate::error::{RecordError, Result};
use crate::shell::Menu;
use std::io::{BufRead, Write};

const ENTRIES: &[&str] = &[
    "Agregar venta",
    "Eliminar venta",
    "Actualizar venta",
    "Buscar venta",
    "Mostrar todas las ventas",
    "Guardar en JSON",
    "Cargar desde JSON",
];

/// Word that ends the line-item loop
const END_OF_ITEMS: &str = "fin";

pub struct SalesApp {
    config: AppConfig,
    ledger: SalesLedger,
}

impl SalesApp {
    pub fn new(config: AppConfig) -> Self {
        SalesApp {
            config,
            ledger: SalesLedger::new(),
        }
    }

    pub fn ledger(&self) -> &SalesLedger {
        &self.ledger
    }

    fn add<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let online = prompt_variant(console, "Tipo de venta (1: Online, 2: Local): ", "venta")?;
        let date = Sale::timestamp_now();
        let customer = console.prompt("Nombre del cliente: ")?;

        let mut items = Vec::new();
        loop {
            let name = console.prompt("Nombre del producto (o 'fin' para terminar): ")?;
            if name.eq_ignore_ascii_case(END_OF_ITEMS) {
                break;
            }
            let price = console.prompt_amount("Precio del producto: ")?;
            items.push(LineItem::new(name, price));
        }

        let sale = if online {
            let address = console.prompt("Dirección de envío: ")?;
            Sale::online(date, customer, items, address)
        } else {
            let branch = console.prompt("Sucursal: ")?;
            Sale::local(date, customer, items, branch)
        };

        self.ledger.add(sale);
        console.say("Venta agregada con éxito")
    }

    fn remove<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let index: usize = console.prompt_parsed("Índice de la venta a eliminar: ")?;
        self.ledger.remove(index)?;
        console.say("Venta eliminada con éxito")
    }

    fn update<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let index: usize = console.prompt_parsed("Índice de la venta a actualizar: ")?;
        let online = match self.ledger.find(index) {
            Some(sale) => matches!(sale.kind, SaleKind::Online { .. }),
            None => {
                return Err(RecordError::IndexOutOfRange {
                    index,
                    len: self.ledger.len(),
                })
            }
        };

        let mut patch = SalePatch {
            customer: console.prompt_optional("Nuevo nombre del cliente (en blanco para no cambiar): ")?,
            ..SalePatch::default()
        };
        if online {
            patch.shipping_address =
                console.prompt_optional("Nueva dirección de envío (en blanco para no cambiar): ")?;
        } else {
            patch.branch = console.prompt_optional("Nueva sucursal (en blanco para no cambiar): ")?;
        }

        self.ledger.update(index, &patch)?;
        console.say("Venta actualizada con éxito")
    }

    fn find<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        let index: usize = console.prompt_parsed("Índice de la venta a buscar: ")?;
        match self.ledger.find(index) {
            Some(sale) => console.say(sale),
            None => console.say("Venta no encontrada"),
        }
    }

    fn list<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        if self.ledger.is_empty() {
            return console.say("No hay ventas");
        }
        for (idx, sale) in self.ledger.list().enumerate() {
            console.say(format!("{idx}: {sale}"))?;
        }
        Ok(())
    }
}

impl Menu for SalesApp {
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
                self.ledger.save_to_file(&self.config.data_file)?;
                console.say("Ventas guardadas en JSON")
            }
            7 => {
                let skipped = self.ledger.load_from_file(&self.config.data_file)?;
                report_load(console, "Ventas cargadas desde JSON", self.ledger.len(), skipped)
            }
            other => Err(RecordError::invalid(format!("opción {other} no existe"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::test_support::drive;

    fn app(dir: &tempfile::TempDir) -> SalesApp {
        SalesApp::new(AppConfig::sales().with_data_file(dir.path().join("ventas.json")))
    }

    fn customers(app: &SalesApp) -> Vec<String> {
        app.ledger().list().map(|s| s.customer.clone()).collect()
    }

    const ADD_ANA: &str = "1\n1\nAna\nTeclado\n20\nRatón\n10\nFIN\nCalle 1\n";
    const ADD_LUIS: &str = "1\n2\nLuis\nMonitor\n150\nfin\nCentro\n";
    const ADD_EVA: &str = "1\n2\nEva\nfin\nNorte\n";

    #[test]
    fn test_add_and_list_with_indices() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);

        let out = drive(&mut app, &format!("{ADD_ANA}{ADD_LUIS}5\n8\n"));
        assert_eq!(out.matches("Venta agregada con éxito").count(), 2);
        assert!(out.contains("0: Venta Online"));
        assert!(out.contains("Total: $35"));
        assert!(out.contains("1: Venta Local"));
        assert!(out.contains("Sucursal: Centro"));

        let ana = app.ledger().find(0).unwrap();
        assert_eq!(ana.items, vec![LineItem::new("Teclado", 20.0), LineItem::new("Ratón", 10.0)]);
    }

    #[test]
    fn test_delete_by_index() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);

        let out = drive(&mut app, &format!("{ADD_ANA}{ADD_LUIS}{ADD_EVA}2\n3\n2\n-1\n2\n2\n8\n"));
        assert!(out.contains("índice 3 fuera de rango (hay 3 registros)"));
        assert!(out.contains("'-1' no es un valor válido"));
        assert!(out.contains("Venta eliminada con éxito"));
        assert_eq!(customers(&app), vec!["Ana", "Luis"]);
    }

    #[test]
    fn test_update_customer_keeps_blank_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(&dir);

        let out = drive(&mut app, &format!("{ADD_ANA}{ADD_LUIS}3\n1\nLuisa\n\n3\n0\n\nCalle 9\n3\n4\n4\n1\n8\n"));
        assert_eq!(out.matches("Venta actualizada con éxito").count(), 2);
        assert!(out.contains("índice 4 fuera de rango"));

        let luisa = app.ledger().find(1).unwrap();
        assert_eq!(luisa.customer, "Luisa");
        assert_eq!(luisa.kind, SaleKind::Local { branch: "Centro".to_string() });

        let ana = app.ledger().find(0).unwrap();
        assert_eq!(ana.customer, "Ana");
        assert_eq!(
            ana.kind,
            SaleKind::Online {
                shipping_address: "Calle 9".to_string()
            }
        );
        assert!(out.contains("Venta Local - Fecha:"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut first = app(&dir);
        drive(&mut first, &format!("{ADD_ANA}{ADD_LUIS}6\n8\n"));

        let mut second = app(&dir);
        let out = drive(&mut second, "7\n4\n9\n8\n");
        assert!(out.contains("Ventas cargadas desde JSON (2 registro(s))"));
        assert!(out.contains("Venta no encontrada"));
        assert_eq!(
            second.ledger().list().cloned().collect::<Vec<_>>(),
            first.ledger().list().cloned().collect::<Vec<_>>()
        );
    }
}
