use leakscan_core::domain::{MatchRecord, MatchSummary};
use std::io::{self, Write};

pub fn write_match<W: Write>(out: &mut W, name: &str, record: &MatchRecord) -> io::Result<()> {
    writeln!(
        out,
        "{}: {} matched {}",
        name, record.queried_number, record.matched_identity
    )
}

pub fn write_summary<W: Write>(out: &mut W, summary: &MatchSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Compromised contacts:")?;
    for name in &summary.compromised {
        writeln!(out, "{}", name)?;
    }
    writeln!(out, "Total: {}", summary.total)
}

#[cfg(test)]
mod tests {
    use super::{write_match, write_summary};
    use leakscan_core::domain::{MatchRecord, MatchSummary};

    #[test]
    fn report_lists_matches_then_names_then_count() {
        let mut out = Vec::new();
        let record = MatchRecord {
            queried_number: "55512345XX".to_string(),
            matched_identity: "ada_l".to_string(),
        };
        write_match(&mut out, "Ada Lovelace", &record).expect("write match");

        let mut summary = MatchSummary::default();
        summary.record("Grace Hopper");
        summary.record("Ada Lovelace");
        write_summary(&mut out, &summary).expect("write summary");

        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(
            text,
            "Ada Lovelace: 55512345XX matched ada_l\n\
             \n\
             Compromised contacts:\n\
             Ada Lovelace\n\
             Grace Hopper\n\
             Total: 2\n"
        );
    }

    #[test]
    fn empty_summary_still_prints_count() {
        let mut out = Vec::new();
        write_summary(&mut out, &MatchSummary::default()).expect("write summary");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.ends_with("Compromised contacts:\nTotal: 0\n"));
    }
}
