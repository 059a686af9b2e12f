// 📦 Inventario - interactive console over product records

use anyhow::Result;
use record_desk::apps::{self, InventoryApp};
use record_desk::config::AppConfig;

fn main() -> Result<()> {
    let config = AppConfig::inventory();
    let app = InventoryApp::new(config.clone());
    apps::launch(&config, app)
}
