mod action;
mod app;
mod app_state;
mod component;
mod components;
mod theme;
mod widgets;

use anyhow::Result;

fn main() -> Result<()> {
    let data_dir = kino_models::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("tui.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("kinoteka log: {}", log_path.display());

    tracing::info!("kinoteka starting…");

    let config = match kino_models::config::Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("config load failed, using defaults: {}", e);
            kino_models::config::Config::default()
        }
    };

    app::App::new(&config).run()
}
