use crate::Result;
use leakscan_core::domain::Contact;
use std::collections::HashSet;
use tracing::{debug, warn};

/// One entry of a contacts feed page, before filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub full_name: Option<String>,
    pub phone_numbers: Vec<String>,
}

impl FeedEntry {
    /// Entries without a name or without phone numbers are not contacts.
    pub fn into_contact(self) -> Option<Contact> {
        let contact = Contact::new(self.full_name?, self.phone_numbers);
        if let Err(err) = contact.validate() {
            debug!(error = %err, "skipping feed entry");
            return None;
        }
        Some(contact)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedPage {
    pub entries: Vec<FeedEntry>,
    pub next: Option<String>,
}

pub trait PageSource {
    fn source_name(&self) -> &'static str;

    /// Fetches the first page when `next` is `None`, otherwise the page the
    /// previous response linked to.
    fn fetch_page(&self, next: Option<&str>) -> Result<FeedPage>;
}

/// Lazily walks a paginated contacts feed.
///
/// Each page is requested once. Iteration stops after the last page, after
/// the first error, or when a next link points at a page already fetched.
pub struct ContactPages<'a, S: PageSource + ?Sized> {
    source: &'a S,
    entries: std::vec::IntoIter<FeedEntry>,
    next: Option<String>,
    visited: HashSet<String>,
    pages: usize,
    done: bool,
}

impl<'a, S: PageSource + ?Sized> ContactPages<'a, S> {
    /// Requests the first page from `source`.
    pub fn start(source: &'a S) -> Result<Self> {
        let first = source.fetch_page(None)?;
        Ok(Self::with_first_page(source, first))
    }

    /// Continues from a first page that was already fetched.
    pub fn with_first_page(source: &'a S, first: FeedPage) -> Self {
        debug!(
            source = source.source_name(),
            entries = first.entries.len(),
            has_next = first.next.is_some(),
            "fetched first page"
        );
        Self {
            source,
            entries: first.entries.into_iter(),
            next: first.next,
            visited: HashSet::new(),
            pages: 1,
            done: false,
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages
    }

    fn advance(&mut self) -> Result<bool> {
        let Some(link) = self.next.take() else {
            return Ok(false);
        };
        if !self.visited.insert(link.clone()) {
            warn!(link = %link, "feed linked to a page already fetched; stopping");
            return Ok(false);
        }

        let page = self.source.fetch_page(Some(&link))?;
        self.pages += 1;
        debug!(
            source = self.source.source_name(),
            page = self.pages,
            entries = page.entries.len(),
            has_next = page.next.is_some(),
            "fetched page"
        );
        self.entries = page.entries.into_iter();
        self.next = page.next;
        Ok(true)
    }
}

impl<S: PageSource + ?Sized> Iterator for ContactPages<'_, S> {
    type Item = Result<Contact>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            if let Some(entry) = self.entries.next() {
                match entry.into_contact() {
                    Some(contact) => return Some(Ok(contact)),
                    None => continue,
                }
            }

            match self.advance() {
                Ok(true) => {}
                Ok(false) => self.done = true,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}
