// 💳 Cuentas - interactive console over bank account records

use anyhow::Result;
use record_desk::apps::{self, BankApp};
use record_desk::config::AppConfig;

fn main() -> Result<()> {
    let config = AppConfig::bank();
    let app = BankApp::new(config.clone());
    apps::launch(&config, app)
}
