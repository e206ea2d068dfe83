use crate::error::StoreError;
use crate::repo::RecordsRepo;
use leakscan_core::domain::{MatchRecord, MatchSummary, NormalizedContact};
use tracing::debug;

/// Looks up each contact's normalized numbers in the breach records.
pub struct BreachMatcher<'a> {
    records: RecordsRepo<'a>,
}

impl<'a> BreachMatcher<'a> {
    pub fn new(records: RecordsRepo<'a>) -> Self {
        Self { records }
    }

    /// Pulls contacts until the input ends, calling `on_match` for every
    /// matched record.
    ///
    /// A contact stops being queried as soon as its trimmed name is in the
    /// compromised set, so each name is reported once. The first error from
    /// `contacts` or from the store ends the run without a summary.
    pub fn run<I, E, F>(&self, contacts: I, mut on_match: F) -> Result<MatchSummary, E>
    where
        I: IntoIterator<Item = Result<NormalizedContact, E>>,
        E: From<StoreError>,
        F: FnMut(&str, &MatchRecord),
    {
        let mut summary = MatchSummary::default();
        let mut checked = 0usize;

        for contact in contacts {
            let contact = contact?;
            let name = contact.full_name.trim();
            checked += 1;

            for number in &contact.phone_numbers {
                if summary.is_compromised(name) {
                    break;
                }
                let matches = self.records.find_by_phone(number)?;
                debug!(contact = name, number = %number, matches = matches.len(), "lookup");
                for record in &matches {
                    summary.record(name);
                    on_match(name, record);
                }
            }
        }

        debug!(checked, compromised = summary.total, "matching finished");
        Ok(summary)
    }
}
