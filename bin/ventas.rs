// 🧾 Ventas - interactive console over sale records

use anyhow::Result;
use record_desk::apps::{self, SalesApp};
use record_desk::config::AppConfig;

fn main() -> Result<()> {
    let config = AppConfig::sales();
    let app = SalesApp::new(config.clone());
    apps::launch(&config, app)
}
