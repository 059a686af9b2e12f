// 💳 Account Entity - bank accounts keyed by account number
//
// "The account number is the identity, balance and holder are values"
//
// Two kinds of account:
// - Checking: may go negative down to its overdraft limit
// - Savings: never goes below zero, earns interest on demand

use crate::error::{RecordError, Result};
use crate::store::{self, LoadReport};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

pub const CHECKING_TAG: &str = "CuentaCorriente";
pub const SAVINGS_TAG: &str = "CuentaAhorro";

pub const DEFAULT_OVERDRAFT_LIMIT: f64 = 1000.0;
pub const DEFAULT_INTEREST_RATE: f64 = 0.01;

fn default_overdraft_limit() -> f64 {
    DEFAULT_OVERDRAFT_LIMIT
}

fn default_interest_rate() -> f64 {
    DEFAULT_INTEREST_RATE
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ============================================================================
// ACCOUNT KIND
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tipo")]
pub enum AccountKind {
    /// Checking account (may be overdrawn up to the limit)
    #[serde(rename = "CuentaCorriente")]
    Checking {
        #[serde(rename = "limite_sobregiro", default = "default_overdraft_limit")]
        overdraft_limit: f64,
    },

    /// Savings account (interest-bearing, no overdraft)
    #[serde(rename = "CuentaAhorro")]
    Savings {
        /// Fraction, e.g. 0.01 for 1%
        #[serde(rename = "tasa_interes", default = "default_interest_rate")]
        interest_rate: f64,
    },
}

// ============================================================================
// ACCOUNT ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Account number - the lookup key
    #[serde(rename = "numero_cuenta")]
    pub number: String,

    #[serde(rename = "titular")]
    pub holder: String,

    /// Current balance (negative only for overdrawn checking accounts)
    #[serde(rename = "saldo", default)]
    pub balance: f64,

    /// Day the account was created; files without it get today's date
    #[serde(rename = "fecha_apertura", default = "today")]
    pub opened_on: NaiveDate,

    #[serde(flatten)]
    pub kind: AccountKind,
}

impl Account {
    /// New checking account opened today
    pub fn checking(number: String, holder: String, balance: f64, overdraft_limit: f64) -> Self {
        Account {
            number,
            holder,
            balance,
            opened_on: today(),
            kind: AccountKind::Checking { overdraft_limit },
        }
    }

    /// New savings account opened today
    pub fn savings(number: String, holder: String, balance: f64, interest_rate: f64) -> Self {
        Account {
            number,
            holder,
            balance,
            opened_on: today(),
            kind: AccountKind::Savings { interest_rate },
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            AccountKind::Checking { .. } => CHECKING_TAG,
            AccountKind::Savings { .. } => SAVINGS_TAG,
        }
    }

    /// Largest amount a withdrawal may take right now
    pub fn available(&self) -> f64 {
        match self.kind {
            AccountKind::Checking { overdraft_limit } => self.balance + overdraft_limit,
            AccountKind::Savings { .. } => self.balance,
        }
    }

    /// Check if account is overdrawn (negative balance)
    pub fn is_overdrawn(&self) -> bool {
        self.balance < 0.0
    }

    pub fn deposit(&mut self, amount: f64) -> Result<()> {
        check_amount(amount)?;
        self.balance += amount;
        debug!(number = %self.number, amount, balance = self.balance, "deposit");
        Ok(())
    }

    /// Take `amount` out of the account.
    ///
    /// Checking: allowed while `balance + overdraft_limit >= amount`.
    /// Savings: allowed while `balance >= amount`.
    /// Otherwise `InsufficientFunds` and the balance is untouched.
    pub fn withdraw(&mut self, amount: f64) -> Result<()> {
        check_amount(amount)?;

        let available = self.available();
        if !(available >= amount) {
            return Err(RecordError::InsufficientFunds {
                requested: amount,
                available,
            });
        }

        self.balance -= amount;
        debug!(number = %self.number, amount, balance = self.balance, "withdrawal");
        Ok(())
    }

    /// Savings only: add `balance * interest_rate` and return the interest paid.
    pub fn apply_interest(&mut self) -> Result<f64> {
        match self.kind {
            AccountKind::Savings { interest_rate } => {
                let interest = self.balance * interest_rate;
                self.balance += interest;
                debug!(number = %self.number, interest, "interest applied");
                Ok(interest)
            }
            AccountKind::Checking { .. } => Err(RecordError::invalid(format!(
                "la cuenta {} no es de ahorro",
                self.number
            ))),
        }
    }

    pub fn description(&self) -> String {
        self.to_string()
    }

    /// Balance, limit and rate must all be finite numbers.
    pub fn validate(&self) -> Result<()> {
        check_finite("saldo", self.balance)?;
        match self.kind {
            AccountKind::Checking { overdraft_limit } => {
                check_finite("límite de sobregiro", overdraft_limit)
            }
            AccountKind::Savings { interest_rate } => check_finite("tasa de interés", interest_rate),
        }
    }
}

fn check_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RecordError::invalid(format!("{field} debe ser un número finito, se recibió {value}")))
    }
}

fn check_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(RecordError::invalid(format!(
            "el monto debe ser un número no negativo, se recibió {amount}"
        )))
    }
}

/// Percent with float noise removed (0.035 → 3.5)
fn as_percent(rate: f64) -> f64 {
    (rate * 100.0 * 1_000_000.0).round() / 1_000_000.0
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AccountKind::Checking { overdraft_limit } => write!(
                f,
                "Cuenta Corriente - Número: {}, Titular: {}, Saldo: ${}, Apertura: {}, Límite de sobregiro: ${}",
                self.number, self.holder, self.balance, self.opened_on, overdraft_limit
            ),
            AccountKind::Savings { interest_rate } => write!(
                f,
                "Cuenta de Ahorro - Número: {}, Titular: {}, Saldo: ${}, Apertura: {}, Tasa de interés: {}%",
                self.number,
                self.holder,
                self.balance,
                self.opened_on,
                as_percent(interest_rate)
            ),
        }
    }
}

/// Sparse update for an account.
///
/// `overdraft_limit` only exists on checking accounts and `interest_rate`
/// only on savings accounts; a patch naming the other kind's field leaves
/// that field ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountPatch {
    pub holder: Option<String>,
    pub balance: Option<f64>,
    pub overdraft_limit: Option<f64>,
    pub interest_rate: Option<f64>,
}

impl AccountPatch {
    pub fn is_empty(&self) -> bool {
        *self == AccountPatch::default()
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("saldo", self.balance),
            ("límite de sobregiro", self.overdraft_limit),
            ("tasa de interés", self.interest_rate),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                check_finite(field, value)?;
            }
        }
        Ok(())
    }

    pub fn apply(&self, account: &mut Account) {
        if let Some(holder) = &self.holder {
            account.holder = holder.clone();
        }
        if let Some(balance) = self.balance {
            account.balance = balance;
        }
        match &mut account.kind {
            AccountKind::Checking { overdraft_limit } => {
                if let Some(limit) = self.overdraft_limit {
                    *overdraft_limit = limit;
                }
            }
            AccountKind::Savings { interest_rate } => {
                if let Some(rate) = self.interest_rate {
                    *interest_rate = rate;
                }
            }
        }
    }
}

// ============================================================================
// ACCOUNT REGISTRY
// ============================================================================

/// Registry of all known accounts, in creation order.
#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
}

impl AccountRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        AccountRegistry {
            accounts: Vec::new(),
        }
    }

    /// Register an account (no duplicate check on the number).
    /// Non-finite amounts are `InvalidInput` and nothing is added.
    pub fn create(&mut self, account: Account) -> Result<()> {
        account.validate()?;
        debug!(number = %account.number, kind = account.kind_name(), "account created");
        self.accounts.push(account);
        Ok(())
    }

    /// Remove every account with this number; returns how many were removed.
    pub fn remove(&mut self, number: &str) -> usize {
        let before = self.accounts.len();
        self.accounts.retain(|a| a.number != number);
        before - self.accounts.len()
    }

    /// Patch the first account with this number. `Ok(false)` if there is none.
    pub fn update(&mut self, number: &str, patch: &AccountPatch) -> Result<bool> {
        patch.validate()?;
        match self.find_mut(number) {
            Some(account) => {
                patch.apply(account);
                debug!(number, "account updated");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Find account by number - first match
    pub fn find(&self, number: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.number == number)
    }

    pub fn find_mut(&mut self, number: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.number == number)
    }

    pub fn deposit(&mut self, number: &str, amount: f64) -> Result<()> {
        self.require_mut(number)?.deposit(amount)
    }

    pub fn withdraw(&mut self, number: &str, amount: f64) -> Result<()> {
        self.require_mut(number)?.withdraw(amount)
    }

    pub fn apply_interest(&mut self, number: &str) -> Result<f64> {
        self.require_mut(number)?.apply_interest()
    }

    /// All accounts in creation order
    pub fn list(&self) -> std::slice::Iter<'_, Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Calculate total balance across all accounts
    pub fn total_balance(&self) -> f64 {
        self.accounts.iter().map(|a| a.balance).sum()
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        store::save_records(path, &self.accounts)
    }

    pub fn load_from_file(&mut self, path: &Path) -> Result<usize> {
        let LoadReport { records, skipped } = store::load_records(path)?;
        self.accounts = records;
        Ok(skipped)
    }

    fn require_mut(&mut self, number: &str) -> Result<&mut Account> {
        self.find_mut(number)
            .ok_or_else(|| RecordError::NotFound(number.to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================
