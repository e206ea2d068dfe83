pub mod contact;
pub mod phone;
pub mod record;

pub use contact::{normalize_contacts, Contact, NormalizedContact};
pub use phone::{normalize_phone_masked, MASK, MASKED_DIGITS};
pub use record::{MatchRecord, MatchSummary};
