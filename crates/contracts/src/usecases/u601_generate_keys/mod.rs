//! UseCase u601: assemble a key request from the form, validate it, submit it
//! and pull the generated keys out of whatever the endpoint answers.

pub mod form;
pub mod request;
pub mod response;
pub mod service;
pub mod validation;

pub use form::{FormField, FormState, DURATION_UNITS, FORM_STORAGE_KEY, PACKAGE_CATALOG};
pub use request::{collect_package_ids, KeyRequest, KeyType};
pub use response::{
    extract_keys, keys_clipboard_text, parse_response_body, render_response, ParsedResponse,
};
pub use service::{
    HttpReply, KeyService, KeyTransport, PreparedSubmission, StatusLine, SubmitOutcome,
    TransportError, DEFAULT_API_URL,
};
pub use validation::ValidationError;
