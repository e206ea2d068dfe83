use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("display name is required")]
    EmptyDisplayName,
    #[error("contact has no phone numbers: {0}")]
    NoPhoneNumbers(String),
}
