mod app;
mod config;
mod error;
mod paths;

use std::fs::{self, File};
use std::sync::Arc;

use backoffice_ui::notify::ReqwestTransport;
use backoffice_ui::{HttpNotifier, JsonFileBackend, SettingsProvider};
use simplelog::{LevelFilter, WriteLogger};
use tabledom::Terminal;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use app::{App, Delivery};
use config::Config;
use error::AppError;

fn init_logging() {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, simplelog::Config::default(), file);
        }
        Err(e) => eprintln!("Cannot create log file {}: {e}", path.display()),
    }
}

fn run(runtime: Handle) -> Result<(), AppError> {
    let config = Config::load(paths::config_file().as_deref())?;
    let settings = match paths::ui_state_file() {
        Some(path) => SettingsProvider::new(JsonFileBackend::open(path)?),
        None => SettingsProvider::in_memory(),
    };

    let delivery = match &config.base_url {
        Some(base_url) => {
            let transport = ReqwestTransport::new(base_url)?.timeout(config.timeout());
            let (tx, rx) = mpsc::unbounded_channel();
            log::info!("sending order changes to {base_url}");
            Some(Delivery {
                notifier: Arc::new(HttpNotifier::new(transport, runtime, tx)),
                outcomes: rx,
            })
        }
        None => None,
    };

    let mut app = App::new(&config, settings, delivery)?;
    let mut terminal = Terminal::new()?;
    app.run(&mut terminal)
}

#[tokio::main]
async fn main() {
    init_logging();

    let runtime = Handle::current();
    if let Err(e) = tokio::task::block_in_place(|| run(runtime)) {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
