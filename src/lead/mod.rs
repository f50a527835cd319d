pub mod form;
pub mod phone;
pub mod redirect;
pub mod utm;

pub use form::{validate, Field, FieldErrors, LeadForm, LeadFormData, SubmitError};
pub use phone::format_phone;
pub use redirect::{build_redirect_url, LogNavigator, Navigator, RedirectConfig};
pub use utm::UtmParams;
