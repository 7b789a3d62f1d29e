use anyhow::Result;
use illumination::{DemoConfig, Engine};
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => DemoConfig::load(&path)?,
        None => {
            log::info!("[main] No config file given, using defaults");
            DemoConfig::default()
        }
    };

    Engine::new(config)?.run()
}
