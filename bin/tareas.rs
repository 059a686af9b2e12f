// ✅ Tareas - interactive console over task records

use anyhow::Result;
use record_desk::apps::{self, TasksApp};
use record_desk::config::AppConfig;

fn main() -> Result<()> {
    let config = AppConfig::tasks();
    let app = TasksApp::new(config.clone());
    apps::launch(&config, app)
}
