use std::collections::BTreeSet;

/// One breach row matched by a normalized phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub queried_number: String,
    pub matched_identity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub compromised: BTreeSet<String>,
    pub total: usize,
}

impl MatchSummary {
    pub fn is_compromised(&self, name: &str) -> bool {
        self.compromised.contains(name.trim())
    }

    /// Records a compromised contact; returns false if it was already known.
    pub fn record(&mut self, name: &str) -> bool {
        let inserted = self.compromised.insert(name.trim().to_string());
        self.total = self.compromised.len();
        inserted
    }
}

#[cfg(test)]
mod tests {
    use super::MatchSummary;

    #[test]
    fn record_trims_and_deduplicates_names() {
        let mut summary = MatchSummary::default();
        assert!(summary.record(" Ada Lovelace "));
        assert!(!summary.record("Ada Lovelace"));
        assert!(summary.is_compromised("Ada Lovelace  "));
        assert_eq!(summary.total, 1);
    }
}
