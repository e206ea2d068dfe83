#[cfg(feature = "remote-feed")]
pub mod atom;
pub mod error;
pub mod feed;
pub mod source;

pub use error::{Result, SyncError};
pub use feed::{Credentials, FeedClient, FeedOptions};
pub use source::{ContactPages, FeedEntry, FeedPage, PageSource};
