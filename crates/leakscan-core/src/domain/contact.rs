use crate::domain::phone::normalize_phone_masked;
use crate::error::CoreError;

/// A contact as returned by the remote address book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub full_name: String,
    pub phone_numbers: Vec<String>,
}

impl Contact {
    pub fn new(full_name: impl Into<String>, phone_numbers: Vec<String>) -> Self {
        Self {
            full_name: full_name.into(),
            phone_numbers,
        }
    }

    /// Checks the invariants the fetcher guarantees for every yielded contact.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.full_name.trim().is_empty() {
            return Err(CoreError::EmptyDisplayName);
        }
        if self.phone_numbers.is_empty() {
            return Err(CoreError::NoPhoneNumbers(self.full_name.clone()));
        }
        Ok(())
    }
}

/// A contact whose numbers have been reduced with [`normalize_phone_masked`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedContact {
    pub full_name: String,
    pub phone_numbers: Vec<String>,
}

impl From<Contact> for NormalizedContact {
    fn from(contact: Contact) -> Self {
        let phone_numbers = contact
            .phone_numbers
            .iter()
            .map(|raw| normalize_phone_masked(raw))
            .collect();
        Self {
            full_name: contact.full_name,
            phone_numbers,
        }
    }
}

pub fn normalize_contacts<I>(contacts: I) -> impl Iterator<Item = NormalizedContact>
where
    I: IntoIterator<Item = Contact>,
{
    contacts.into_iter().map(NormalizedContact::from)
}
