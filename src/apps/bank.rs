// 💳 Bank accounts console

use super::{prompt_variant, report_load};
use crate::config::AppConfig;
use crate::console::Console;
use crate::entities::account::{
    Account, AccountKind, AccountPatch, AccountRegistry, DEFAULT_INTEREST_RATE,
    DEFAULT_OVERDRAFT_LIMIT,
};
use crate::error::{RecordError, Result};
use crate::shell::Menu;
use std::io::{BufRead, Write};

const ENTRIES: &[&str] = &[
    "Crear cuenta",
    "Eliminar cuenta",
    "Actualizar cuenta",
    "Buscar cuenta",
    "Depositar",
    "Retirar",
    "Mostrar todas las cuentas",
    "Guardar en JSON",
    "Cargar desde JSON",
];

pub struct BankApp {
    config: AppConfig,
    registry: AccountRegistry,
}

impl BankApp {
    pub fn new(config: AppConfig) -> Self {
        BankApp {
            config,
            registry: AccountRegistry::new(),
        }
    }

    pub fn registry(&self) -> &AccountRegistry {
        &self.registry
    }

    fn create<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let checking = prompt_variant(console, "Tipo de cuenta (1: Corriente, 2: Ahorro): ", "cuenta")?;
        let number = console.prompt("Número de cuenta: ")?;
        let holder = console.prompt("Titular de la cuenta: ")?;
        let balance = console
            .prompt_optional_amount("Saldo inicial (en blanco = 0): ")?
            .unwrap_or(0.0);

        let account = if checking {
            let limit = console
                .prompt_optional_amount(&format!(
                    "Límite de sobregiro (en blanco = {DEFAULT_OVERDRAFT_LIMIT}): "
                ))?
                .unwrap_or(DEFAULT_OVERDRAFT_LIMIT);
            Account::checking(number, holder, balance, limit)
        } else {
            let rate = console
                .prompt_optional_amount(&format!(
                    "Tasa de interés (decimal, en blanco = {DEFAULT_INTEREST_RATE}): "
                ))?
                .unwrap_or(DEFAULT_INTEREST_RATE);
            Account::savings(number, holder, balance, rate)
        };

        self.registry.create(account)?;
        console.say("Cuenta creada con éxito")
    }

    fn remove<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let number = console.prompt("Número de cuenta a eliminar: ")?;
        if self.registry.remove(&number) > 0 {
            console.say("Cuenta eliminada con éxito")
        } else {
            console.say("Cuenta no encontrada")
        }
    }

    fn update<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let number = console.prompt("Número de cuenta a actualizar: ")?;
        let checking = match self.registry.find(&number) {
            Some(account) => {
                console.say(format!("Actualizando cuenta: {account}"))?;
                matches!(account.kind, AccountKind::Checking { .. })
            }
            None => return console.say("Cuenta no encontrada"),
        };

        let mut patch = AccountPatch {
            holder: console.prompt_optional("Nuevo titular de la cuenta (dejar en blanco para no cambiar): ")?,
            balance: console.prompt_optional_amount("Nuevo saldo (dejar en blanco para no cambiar): ")?,
            ..AccountPatch::default()
        };
        if checking {
            patch.overdraft_limit = console
                .prompt_optional_amount("Nuevo límite de sobregiro (dejar en blanco para no cambiar): ")?;
        } else {
            patch.interest_rate = console
                .prompt_optional_amount("Nueva tasa de interés (dejar en blanco para no cambiar): ")?;
        }

        if patch.is_empty() {
            return console.say("Sin cambios");
        }
        if self.registry.update(&number, &patch)? {
            console.say("Cuenta actualizada con éxito")
        } else {
            console.say("No se pudo actualizar la cuenta")
        }
    }

    fn find<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        let number = console.prompt("Número de cuenta a buscar: ")?;
        match self.registry.find(&number) {
            Some(account) => console.say(account),
            None => console.say("Cuenta no encontrada"),
        }
    }

    fn deposit<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let number = console.prompt("Número de cuenta: ")?;
        let amount = console.prompt_amount("Monto a depositar: ")?;
        self.registry.deposit(&number, amount)?;
        console.say("Depósito realizado con éxito")
    }

    fn withdraw<R: BufRead, W: Write>(&mut self, console: &mut Console<R, W>) -> Result<()> {
        let number = console.prompt("Número de cuenta: ")?;
        let amount = console.prompt_amount("Monto a retirar: ")?;
        self.registry.withdraw(&number, amount)?;
        console.say("Retiro realizado con éxito")
    }

    fn list<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<()> {
        if self.registry.is_empty() {
            return console.say("No hay cuentas");
        }
        for account in self.registry.list() {
            console.say(account)?;
        }
        console.say(format!("Saldo total: ${}", self.registry.total_balance()))
    }
}

impl Menu for BankApp {
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
            1 => self.create(console),
            2 => self.remove(console),
            3 => self.update(console),
            4 => self.find(console),
            5 => self.deposit(console),
            6 => self.withdraw(console),
            7 => self.list(console),
            8 => {
                self.registry.save_to_file(&self.config.data_file)?;
                console.say("Cuentas guardadas en JSON")
            }
            9 => {
                let skipped = self.registry.load_from_file(&self.config.data_file)?;
                report_load(console, "Cuentas cargadas desde JSON", self.registry.len(), skipped)
            }
            other => Err(RecordError::invalid(format!("opción {other} no existe"))),
        }
    }
}
