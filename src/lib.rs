pub mod conversation;
mod demo;
pub mod lead;
pub mod sections;
pub mod settings;
mod utils;
pub mod visibility;
pub mod widgets;

use std::path::PathBuf;

use log::{error, warn};
use settings::SettingsStore;
use url::Url;

const SETTINGS_ENV: &str = "AUTOMATIK_SETTINGS";
const LANDING_URL_ENV: &str = "AUTOMATIK_LANDING_URL";
const DEBUG_ENV: &str = "AUTOMATIK_DEBUG";
const DEFAULT_SETTINGS_FILE: &str = "automatik-settings.json";

pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Automatik Labs walkthrough starting up...");

    let result = (|| -> anyhow::Result<()> {
        let settings_path = std::env::var(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SETTINGS_FILE));
        let store = SettingsStore::new(settings_path)?;
        let mut site = store.site();

        let debug_mode = std::env::var(DEBUG_ENV)
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if debug_mode {
            site.conversation = site.conversation.accelerated(10);
        }

        let landing_url = match std::env::var(LANDING_URL_ENV) {
            Ok(raw) => match Url::parse(&raw) {
                Ok(url) => Some(url),
                Err(err) => {
                    warn!("Ignoring {}={}: {}", LANDING_URL_ENV, raw, err);
                    None
                }
            },
            Err(_) => None,
        };

        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(demo::walkthrough(site, landing_url))
    })();

    if let Err(err) = result {
        error!("walkthrough failed: {err:?}");
        std::process::exit(1);
    }
}
