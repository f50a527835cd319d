use anyhow::Result;
use serde::{Deserialize, Serialize};
use url::Url;

use super::form::LeadFormData;
use super::utm::UtmParams;

const ENABLE_LOGS: bool = true;

use crate::log_info;

pub const DEFAULT_ENDPOINT: &str = "https://typebot.co/aplica-es-automatik-labs-e4owx7x";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RedirectConfig {
    /// Chatbot that continues the application flow
    pub endpoint: String,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
        }
    }
}

/// Destination for a validated lead: the chatbot endpoint with the contact
/// fields and captured UTM parameters in its query. Keys already present on
/// the endpoint keep their position and take the new value, never duplicated.
pub fn build_redirect_url(
    config: &RedirectConfig,
    data: &LeadFormData,
    utm: &UtmParams,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&config.endpoint)?;

    let mut pairs: Vec<(&str, &str)> = vec![
        ("name", data.name.as_str()),
        ("email", data.email.as_str()),
        ("phone", data.phone.as_str()),
    ];
    pairs.extend(utm.iter());

    // An endpoint key that is also set here keeps its position and takes
    // the new value; later repeats of it are dropped.
    let mut written: Vec<&str> = Vec::with_capacity(pairs.len());
    let mut merged: Vec<(String, String)> = Vec::new();
    for (key, value) in url.query_pairs() {
        match pairs.iter().find(|(set, _)| *set == key) {
            Some((set, replacement)) => {
                if !written.contains(set) {
                    written.push(*set);
                    merged.push((set.to_string(), replacement.to_string()));
                }
            }
            None => merged.push((key.into_owned(), value.into_owned())),
        }
    }
    merged.extend(
        pairs
            .iter()
            .filter(|(key, _)| !written.contains(key))
            .map(|(key, value)| (key.to_string(), value.to_string())),
    );

    url.set_query(None);
    {
        let mut query = url.query_pairs_mut();
        for (key, value) in &merged {
            query.append_pair(key, value);
        }
    }

    Ok(url)
}

/// Performs the full-page navigation once a lead is accepted.
pub trait Navigator {
    fn navigate(&mut self, url: &Url) -> Result<()>;
}

/// Navigator for headless runs: logs the destination instead of leaving.
#[derive(Debug, Default)]
pub struct LogNavigator {
    visited: Vec<Url>,
}

impl LogNavigator {
    pub fn visited(&self) -> &[Url] {
        &self.visited
    }
}

impl Navigator for LogNavigator {
    fn navigate(&mut self, url: &Url) -> Result<()> {
        log_info!("navigating to {}", url);
        self.visited.push(url.clone());
        Ok(())
    }
}
