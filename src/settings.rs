use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::{
    conversation::ConversationTiming, lead::RedirectConfig, visibility::RevealConfig,
    widgets::HeaderConfig,
};

const ENABLE_LOGS: bool = true;

use crate::log_warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteSettings {
    pub reveal: RevealConfig,
    pub conversation: ConversationTiming,
    pub redirect: RedirectConfig,
    pub header: HeaderConfig,
}

/// JSON-backed settings. Missing or unreadable files fall back to defaults;
/// sections absent from the file keep their defaults too.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<SiteSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!("Ignoring malformed settings in {}: {}", path.display(), err);
                SiteSettings::default()
            })
        } else {
            SiteSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn site(&self) -> SiteSettings {
        match self.data.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn conversation(&self) -> ConversationTiming {
        self.site().conversation
    }

    pub fn update_conversation(&self, timing: ConversationTiming) -> Result<()> {
        self.update(|settings| settings.conversation = timing)
    }

    pub fn update_redirect(&self, redirect: RedirectConfig) -> Result<()> {
        self.update(|settings| settings.redirect = redirect)
    }

    fn update<F: FnOnce(&mut SiteSettings)>(&self, apply: F) -> Result<()> {
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        apply(&mut *guard);
        self.persist(&guard)
    }

    fn persist(&self, data: &SiteSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }

    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let data: SiteSettings = serde_json::from_str(&contents)?;
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        *guard = data;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        let site = store.site();
        assert_eq!(site, SiteSettings::default());
        assert_eq!(site.conversation.agent_typing_ms, 2000);
        assert_eq!(site.reveal.threshold, 0.1);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "conversation": { "pauseMs": 250 } }"#).unwrap();

        let site = SettingsStore::new(path).unwrap().site();
        assert_eq!(site.conversation.pause_ms, 250);
        assert_eq!(site.conversation.user_typing_ms, 1000);
        assert_eq!(site.header.scroll_threshold_px, 50.0);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(SettingsStore::new(path).unwrap().site(), SiteSettings::default());
    }

    #[test]
    fn updates_are_persisted_and_reloadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::new(path.clone()).unwrap();

        let fast = ConversationTiming::default().accelerated(10);
        store.update_conversation(fast.clone()).unwrap();

        let reopened = SettingsStore::new(path).unwrap();
        assert_eq!(reopened.conversation(), fast);
        reopened.reload().unwrap();
        assert_eq!(reopened.conversation().agent_typing_ms, 200);
    }
}
