use leakscan_store::error::{StoreError, StoreErrorKind};
use leakscan_store::repo::BreachRecord;
use leakscan_store::Store;
use tempfile::TempDir;

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

#[test]
fn find_by_phone_returns_exact_matches() {
    let store = seeded_store(&[
        ("55512345XX", "ada_l"),
        ("55512345XX", "countess"),
        ("41555512XX", "grace"),
    ]);

    let matches = store.records().find_by_phone("55512345XX").expect("find");
    let identities: Vec<_> = matches
        .iter()
        .map(|record| record.matched_identity.as_str())
        .collect();
    assert_eq!(identities, vec!["ada_l", "countess"]);
    assert!(matches
        .iter()
        .all(|record| record.queried_number == "55512345XX"));
}

#[test]
fn find_by_phone_without_rows_is_empty() {
    let store = seeded_store(&[("55512345XX", "ada_l")]);
    let matches = store.records().find_by_phone("5551234").expect("find");
    assert!(matches.is_empty());
}

#[test]
fn find_by_phone_treats_input_as_data() {
    let store = seeded_store(&[("55512345XX", "ada_l"), ("41555512XX", "grace")]);

    let matches = store
        .records()
        .find_by_phone("x' OR '1'='1")
        .expect("find");
    assert!(matches.is_empty());

    let matches = store
        .records()
        .find_by_phone("x'; DROP TABLE records; --")
        .expect("find");
    assert!(matches.is_empty());
    assert_eq!(store.records().count().expect("count"), 2);
}

#[test]
fn open_requires_existing_database() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("records.sqlite3");

    let err = match Store::open(&missing) {
        Ok(_) => panic!("expected missing database error"),
        Err(err) => err,
    };
    assert_eq!(err.kind(), StoreErrorKind::MissingDatabase);
    assert!(matches!(err, StoreError::MissingDatabase(path) if path == missing));
    assert!(!missing.exists());
}

#[test]
fn open_reads_records_from_disk() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("records.sqlite3");

    {
        let store = Store::create(&path).expect("create store");
        store.migrate().expect("migrate");
        store
            .records()
            .insert(&BreachRecord {
                phone: "41555512XX".to_string(),
                username: "grace".to_string(),
            })
            .expect("insert");
    }

    let reopened = Store::open(&path).expect("reopen store");
    let matches = reopened.records().find_by_phone("41555512XX").expect("find");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].matched_identity, "grace");
}

fn table_names(store: &Store) -> Vec<String> {
    let mut stmt = store
        .connection()
        .prepare("SELECT name FROM sqlite_master ORDER BY name;")
        .expect("prepare");
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .expect("query");
    rows.collect::<Result<Vec<_>, _>>().expect("names")
}

#[test]
fn open_is_read_only_and_leaves_schema_alone() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("records.sqlite3");
    {
        let seed = Store::create(&path).expect("create store");
        seed.connection()
            .execute_batch(
                "CREATE TABLE records (phone TEXT, username TEXT);
                 INSERT INTO records (phone, username) VALUES ('55512345XX', 'ada_l');",
            )
            .expect("seed");
    }

    let store = Store::open(&path).expect("open store");
    let before = table_names(&store);
    assert_eq!(before, vec!["records"]);

    let matches = store.records().find_by_phone("55512345XX").expect("find");
    assert_eq!(matches.len(), 1);

    let err = store
        .records()
        .insert(&BreachRecord {
            phone: "41555512XX".to_string(),
            username: "grace".to_string(),
        })
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::Sql);
    assert!(store.migrate().is_err());
    assert_eq!(table_names(&store), before);
}

#[test]
fn null_identity_is_reported_as_empty() {
    let store = Store::open_in_memory().expect("open store");
    store
        .connection()
        .execute_batch(
            "CREATE TABLE records (phone TEXT, username TEXT);
             INSERT INTO records (phone, username) VALUES ('55512345XX', NULL);
             INSERT INTO records (phone, username) VALUES ('55512345XX', 'ada_l');",
        )
        .expect("seed");

    let matches = store.records().find_by_phone("55512345XX").expect("find");
    let identities: Vec<_> = matches
        .iter()
        .map(|record| record.matched_identity.as_str())
        .collect();
    assert_eq!(identities, vec!["", "ada_l"]);
}
