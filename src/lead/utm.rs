use serde::{Deserialize, Serialize};
use url::Url;

pub const UTM_KEYS: [&str; 5] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
];

/// Campaign tracking parameters captured from the landing URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmParams {
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
}

impl UtmParams {
    /// Parse a raw query string, with or without the leading `?`. The first
    /// non-empty occurrence of each key wins.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::default();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            if let Some(slot) = params.slot_mut(&key) {
                if slot.is_none() {
                    *slot = Some(value.into_owned());
                }
            }
        }
        params
    }

    pub fn from_url(url: &Url) -> Self {
        Self::from_query(url.query().unwrap_or_default())
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Captured parameters in canonical key order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            &self.utm_source,
            &self.utm_medium,
            &self.utm_campaign,
            &self.utm_term,
            &self.utm_content,
        ]
        .into_iter()
        .zip(UTM_KEYS)
        .filter_map(|(value, key)| value.as_deref().map(|value| (key, value)))
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            "utm_source" => Some(&mut self.utm_source),
            "utm_medium" => Some(&mut self.utm_medium),
            "utm_campaign" => Some(&mut self.utm_campaign),
            "utm_term" => Some(&mut self.utm_term),
            "utm_content" => Some(&mut self.utm_content),
            _ => None,
        }
    }
}
