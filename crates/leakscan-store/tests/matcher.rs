use leakscan_core::domain::{Contact, MatchRecord, NormalizedContact};
use leakscan_store::error::StoreError;
use leakscan_store::repo::BreachRecord;
use leakscan_store::Store;

fn seeded_store(rows: &[(&str, &str)]) -> Store {
    let store = Store::open_in_memory().expect("open store");
    store.migrate().expect("migrate");
    for (phone, username) in rows {
        store
            .records()
            .insert(&BreachRecord {
                phone: phone.to_string(),
                username: username.to_string(),
            })
            .expect("insert record");
    }
    store
}

fn normalized(name: &str, numbers: &[&str]) -> Result<NormalizedContact, StoreError> {
    Ok(NormalizedContact::from(Contact::new(
        name,
        numbers.iter().map(|number| number.to_string()).collect(),
    )))
}

#[test]
fn contacts_sharing_a_number_are_both_reported() {
    let store = seeded_store(&[("55512345XX", "ada_l")]);
    let contacts = vec![
        normalized("Ada Lovelace", &["+1 555 123 4567"]),
        normalized("Augusta King", &["555-123-4599"]),
    ];

    let mut seen: Vec<(String, MatchRecord)> = Vec::new();
    let summary = store
        .matcher()
        .run(contacts, |name, record| {
            seen.push((name.to_string(), record.clone()))
        })
        .expect("run matcher");

    assert_eq!(summary.total, 2);
    assert!(summary.is_compromised("Ada Lovelace"));
    assert!(summary.is_compromised("Augusta King"));
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].1.matched_identity, "ada_l");
    assert_eq!(seen[1].1.queried_number, "55512345XX");
}

#[test]
fn compromised_contact_is_not_queried_again() {
    let store = seeded_store(&[("55512345XX", "ada_l"), ("41555512XX", "ada_alt")]);
    let contacts = vec![normalized(
        "Ada Lovelace",
        &["15551234567", "4155551234"],
    )];

    let mut lines = Vec::new();
    let summary = store
        .matcher()
        .run(contacts, |name, record| {
            lines.push(format!("{name}: {}", record.matched_identity))
        })
        .expect("run matcher");

    assert_eq!(summary.total, 1);
    assert_eq!(lines, vec!["Ada Lovelace: ada_l"]);
}

#[test]
fn every_row_for_a_number_is_reported_but_name_counted_once() {
    let store = seeded_store(&[("55512345XX", "ada_l"), ("55512345XX", "countess")]);
    let contacts = vec![normalized("  Ada Lovelace ", &["15551234567"])];

    let mut identities = Vec::new();
    let summary = store
        .matcher()
        .run(contacts, |name, record| {
            assert_eq!(name, "Ada Lovelace");
            identities.push(record.matched_identity.clone());
        })
        .expect("run matcher");

    assert_eq!(identities, vec!["ada_l", "countess"]);
    assert_eq!(
        summary.compromised.iter().collect::<Vec<_>>(),
        vec!["Ada Lovelace"]
    );
    assert_eq!(summary.total, 1);
}

#[test]
fn duplicate_names_are_reported_once() {
    let store = seeded_store(&[("55512345XX", "ada_l"), ("41555512XX", "ada_alt")]);
    let contacts = vec![
        normalized("Ada Lovelace", &["15551234567"]),
        normalized("Ada Lovelace ", &["4155551234"]),
    ];

    let mut calls = 0;
    let summary = store
        .matcher()
        .run(contacts, |_, _| calls += 1)
        .expect("run matcher");

    assert_eq!(calls, 1);
    assert_eq!(summary.total, 1);
}

#[test]
fn contacts_without_matches_or_numbers_are_silent() {
    let store = seeded_store(&[("55512345XX", "ada_l")]);
    let contacts = vec![
        normalized("Grace Hopper", &["(212) 555-0100"]),
        normalized("Alan Turing", &[]),
    ];

    let summary = store
        .matcher()
        .run(contacts, |_, _| panic!("no match expected"))
        .expect("run matcher");

    assert!(summary.compromised.is_empty());
    assert_eq!(summary.total, 0);
}

#[test]
fn upstream_error_aborts_without_summary() {
    let store = seeded_store(&[("55512345XX", "ada_l")]);
    let contacts = vec![
        normalized("Ada Lovelace", &["15551234567"]),
        Err(StoreError::Migration("upstream failed".to_string())),
        normalized("Augusta King", &["15551234599"]),
    ];

    let mut calls = 0;
    let err = store
        .matcher()
        .run(contacts, |_, _| calls += 1)
        .unwrap_err();

    assert!(err.to_string().contains("upstream failed"));
    assert_eq!(calls, 1);
}

#[test]
fn missing_records_table_is_fatal() {
    let store = Store::open_in_memory().expect("open store");
    let contacts = vec![normalized("Ada Lovelace", &["15551234567"])];

    let err = store
        .matcher()
        .run(contacts, |_, _| {})
        .unwrap_err();
    assert!(matches!(err, StoreError::Sql(_)));
}
