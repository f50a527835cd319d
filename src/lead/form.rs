use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use super::phone::{digit_count, format_phone};
use super::redirect::{build_redirect_url, Navigator, RedirectConfig};
use super::utm::UtmParams;

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info};

pub const NAME_REQUIRED: &str = "Nome é obrigatório";
pub const EMAIL_REQUIRED: &str = "E-mail é obrigatório";
pub const EMAIL_INVALID: &str = "E-mail inválido";
pub const PHONE_REQUIRED: &str = "Telefone é obrigatório";
pub const PHONE_INVALID: &str = "Telefone inválido";

const MIN_PHONE_DIGITS: usize = 10;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\d()+\-]+$").expect("phone pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Phone,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadFormData {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Per-field messages shown under the inputs. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    fn set(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }
}

pub fn validate(data: &LeadFormData) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if data.name.trim().is_empty() {
        errors.set(Field::Name, NAME_REQUIRED);
    }

    if data.email.trim().is_empty() {
        errors.set(Field::Email, EMAIL_REQUIRED);
    } else if !EMAIL_PATTERN.is_match(&data.email) {
        errors.set(Field::Email, EMAIL_INVALID);
    }

    if data.phone.trim().is_empty() {
        errors.set(Field::Phone, PHONE_REQUIRED);
    } else {
        let compact: String = data.phone.chars().filter(|c| !c.is_whitespace()).collect();
        if !PHONE_PATTERN.is_match(&compact) || digit_count(&compact) < MIN_PHONE_DIGITS {
            errors.set(Field::Phone, PHONE_INVALID);
        }
    }

    errors
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a submission is already in progress")]
    InProgress,
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),
    #[error("invalid redirect endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("navigation failed: {0}")]
    Navigation(anyhow::Error),
}

/// Lead capture form: field state, inline errors and the hand-off to the
/// chatbot.
#[derive(Debug, Clone, Default)]
pub struct LeadForm {
    data: LeadFormData,
    errors: FieldErrors,
    utm: UtmParams,
    submitting: bool,
}

impl LeadForm {
    /// Form for a page loaded with `utm`; the parameters are captured once.
    pub fn new(utm: UtmParams) -> Self {
        Self {
            utm,
            ..Self::default()
        }
    }

    pub fn data(&self) -> &LeadFormData {
        &self.data
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn utm(&self) -> &UtmParams {
        &self.utm
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Record an edit. Phone input is re-masked as it is typed, and the
    /// field's error goes away until the next submit.
    pub fn set_field(&mut self, field: Field, value: &str) {
        match field {
            Field::Name => self.data.name = value.to_string(),
            Field::Email => self.data.email = value.to_string(),
            Field::Phone => self.data.phone = format_phone(value),
        }
        self.errors.clear(field);
    }

    pub fn submit<N: Navigator + ?Sized>(
        &mut self,
        config: &RedirectConfig,
        navigator: &mut N,
    ) -> Result<Url, SubmitError> {
        if self.submitting {
            return Err(SubmitError::InProgress);
        }

        self.errors = validate(&self.data);
        if !self.errors.is_empty() {
            return Err(SubmitError::Invalid(self.errors.clone()));
        }

        self.submitting = true;
        let url = match build_redirect_url(config, &self.data, &self.utm) {
            Ok(url) => url,
            Err(err) => {
                log_error!("cannot build redirect from {}: {}", config.endpoint, err);
                self.submitting = false;
                return Err(err.into());
            }
        };

        if let Err(err) = navigator.navigate(&url) {
            log_error!("lead redirect failed: {err:?}");
            self.submitting = false;
            return Err(SubmitError::Navigation(err));
        }

        log_info!("lead accepted, redirecting to {}", url.host_str().unwrap_or_default());
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;
    use crate::lead::redirect::LogNavigator;

    fn filled() -> LeadFormData {
        LeadFormData {
            name: "João".into(),
            email: "joao@empresa.com".into(),
            phone: "(11) 99999-8888".into(),
        }
    }

    struct FailingNavigator;

    impl Navigator for FailingNavigator {
        fn navigate(&mut self, _url: &Url) -> anyhow::Result<()> {
            Err(anyhow!("blocked by the browser"))
        }
    }

    #[test]
    fn empty_email_is_required() {
        let data = LeadFormData {
            email: String::new(),
            ..filled()
        };
        assert_eq!(validate(&data).get(Field::Email), Some(EMAIL_REQUIRED));
    }

    #[test]
    fn email_needs_a_dotted_domain() {
        let mut data = filled();
        data.email = "foo@bar".into();
        assert_eq!(validate(&data).get(Field::Email), Some(EMAIL_INVALID));

        data.email = "foo@bar.com".into();
        assert_eq!(validate(&data).get(Field::Email), None);
    }

    #[test]
    fn blank_name_is_required() {
        let data = LeadFormData {
            name: "   ".into(),
            ..filled()
        };
        assert_eq!(validate(&data).get(Field::Name), Some(NAME_REQUIRED));
    }

    #[test]
    fn phone_rules() {
        let mut data = filled();
        data.phone = "".into();
        assert_eq!(validate(&data).get(Field::Phone), Some(PHONE_REQUIRED));

        data.phone = "(11) 9999-888".into();
        assert_eq!(validate(&data).get(Field::Phone), Some(PHONE_INVALID));

        data.phone = "11 99999 8888 ramal".into();
        assert_eq!(validate(&data).get(Field::Phone), Some(PHONE_INVALID));

        data.phone = "+55 (11) 3333-4444".into();
        assert_eq!(validate(&data).get(Field::Phone), None);
    }

    #[test]
    fn valid_form_has_no_errors() {
        assert!(validate(&filled()).is_empty());
    }

    #[test]
    fn invalid_submit_keeps_input_and_reports_errors() {
        let mut form = LeadForm::default();
        form.set_field(Field::Name, "Ana");
        let mut navigator = LogNavigator::default();

        let err = form
            .submit(&RedirectConfig::default(), &mut navigator)
            .unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(ref errors) if errors.len() == 2));
        assert_eq!(form.data().name, "Ana");
        assert!(!form.is_submitting());
        assert!(navigator.visited().is_empty());
    }

    #[test]
    fn editing_a_field_clears_its_error() {
        let mut form = LeadForm::default();
        let _ = form.submit(&RedirectConfig::default(), &mut LogNavigator::default());
        assert!(form.errors().get(Field::Phone).is_some());

        form.set_field(Field::Phone, "11999998888");
        assert_eq!(form.errors().get(Field::Phone), None);
        assert_eq!(form.data().phone, "(11) 99999-8888");
        assert!(form.errors().get(Field::Name).is_some());
    }

    #[test]
    fn successful_submit_navigates_once() {
        let mut form = LeadForm::new(UtmParams::from_query("utm_medium=cpc"));
        form.set_field(Field::Name, "João");
        form.set_field(Field::Email, "joao@empresa.com");
        form.set_field(Field::Phone, "11999998888");
        let mut navigator = LogNavigator::default();

        let url = form
            .submit(&RedirectConfig::default(), &mut navigator)
            .unwrap();
        assert_eq!(navigator.visited(), &[url.clone()]);
        assert!(url.query().unwrap_or_default().contains("utm_medium=cpc"));
        assert!(form.is_submitting());

        assert!(matches!(
            form.submit(&RedirectConfig::default(), &mut navigator),
            Err(SubmitError::InProgress)
        ));
    }

    #[test]
    fn failed_navigation_allows_retry() {
        let mut form = LeadForm::default();
        form.set_field(Field::Name, "João");
        form.set_field(Field::Email, "joao@empresa.com");
        form.set_field(Field::Phone, "1133334444");

        let err = form
            .submit(&RedirectConfig::default(), &mut FailingNavigator)
            .unwrap_err();
        assert!(matches!(err, SubmitError::Navigation(_)));
        assert!(!form.is_submitting());
        assert_eq!(form.data().phone, "(11) 3333-4444");

        assert!(form
            .submit(&RedirectConfig::default(), &mut LogNavigator::default())
            .is_ok());
    }
}
