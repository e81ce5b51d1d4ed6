use metakv_core::db::{open_db, open_db_in_memory};
use metakv_core::{Command, Outcome, Payload, Record, SqliteRecordStore, StorageEngine};

fn engine() -> StorageEngine<SqliteRecordStore> {
    let conn = open_db_in_memory().unwrap();
    StorageEngine::new(SqliteRecordStore::try_new(conn).unwrap())
}

fn run(engine: &mut StorageEngine<SqliteRecordStore>, line: &str) -> Outcome {
    engine.execute(&Command::parse(line))
}

fn keys(outcome: Outcome) -> Vec<String> {
    match outcome {
        Outcome::Ok(Payload::Records(records)) => {
            records.into_iter().map(|record| record.key).collect()
        }
        other => panic!("expected records, got {other:?}"),
    }
}

#[test]
fn set_then_set_then_get_returns_latest_value() {
    let mut engine = engine();
    assert_eq!(run(&mut engine, "set k v1"), Outcome::Ok(Payload::None));
    assert_eq!(run(&mut engine, "set k v2"), Outcome::Ok(Payload::None));
    assert_eq!(run(&mut engine, "set k v2"), Outcome::Ok(Payload::None));

    assert_eq!(
        run(&mut engine, "get k"),
        Outcome::Ok(Payload::Value("v2".to_string()))
    );
}

#[test]
fn get_of_unset_key_is_ok_none() {
    let mut engine = engine();
    assert_eq!(run(&mut engine, "get never.set"), Outcome::Ok(Payload::None));
}

#[test]
fn delete_then_get_is_ok_none_and_repeat_delete_is_noop() {
    let mut engine = engine();
    run(&mut engine, "set k v");

    assert_eq!(run(&mut engine, "del k"), Outcome::Ok(Payload::None));
    assert_eq!(run(&mut engine, "get k"), Outcome::Ok(Payload::None));
    assert_eq!(run(&mut engine, "del k"), Outcome::Ok(Payload::None));
}

#[test]
fn list_orders_keys_ascending() {
    let mut engine = engine();
    assert_eq!(run(&mut engine, "list"), Outcome::Ok(Payload::Records(vec![])));

    for line in ["set b 2", "set a 1", "set c 3"] {
        run(&mut engine, line);
    }
    assert_eq!(keys(run(&mut engine, "list")), ["a", "b", "c"]);
}

#[test]
fn find_with_prefix_pattern_returns_matching_records_in_order() {
    let mut engine = engine();
    for line in ["set apple 1", "set apricot 2", "set banana 3"] {
        run(&mut engine, line);
    }

    assert_eq!(
        run(&mut engine, "find a%"),
        Outcome::Ok(Payload::Records(vec![
            Record::new("apple", "1"),
            Record::new("apricot", "2"),
        ]))
    );
    assert_eq!(
        run(&mut engine, "find kiwi%"),
        Outcome::Ok(Payload::Records(vec![]))
    );
}

#[test]
fn multi_word_value_round_trips_exactly() {
    let mut engine = engine();
    run(&mut engine, "set motd   Welcome  to   the   server");

    assert_eq!(
        run(&mut engine, "get motd"),
        Outcome::Ok(Payload::Value("Welcome to the server".to_string()))
    );
}

#[test]
fn unicode_value_round_trips_exactly() {
    let mut engine = engine();
    let command = Command::Set {
        key: "city".to_string(),
        value: "Zürich 東京 'quoted' %literal%".to_string(),
    };
    assert_eq!(engine.execute(&command), Outcome::Ok(Payload::None));

    assert_eq!(
        run(&mut engine, "get city"),
        Outcome::Ok(Payload::Value("Zürich 東京 'quoted' %literal%".to_string()))
    );
}

#[test]
fn backend_failure_is_reported_and_session_continues() {
    let mut engine = engine();
    let too_long = format!("set {} v", "k".repeat(81));

    match run(&mut engine, &too_long) {
        Outcome::Error(message) => assert!(message.contains("CHECK constraint failed")),
        other => panic!("expected backend error, got {other:?}"),
    }

    assert_eq!(run(&mut engine, "set k v"), Outcome::Ok(Payload::None));
    assert_eq!(
        run(&mut engine, "get k"),
        Outcome::Ok(Payload::Value("v".to_string()))
    );
}

#[test]
fn table_dropped_by_another_session_surfaces_as_error_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kv.sqlite3");
    let store = SqliteRecordStore::try_new(open_db(&path).unwrap()).unwrap();
    let mut engine = StorageEngine::new(store);

    open_db(&path)
        .unwrap()
        .execute_batch("DROP TABLE metadata;")
        .unwrap();

    for line in ["set k v", "get k", "del k", "list", "find k%"] {
        assert!(
            matches!(run(&mut engine, line), Outcome::Error(_)),
            "line {line:?}"
        );
    }
}

#[test]
fn malformed_input_never_reaches_storage() {
    let mut engine = engine();
    for line in ["", "set", "set onlykey", "frobnicate", "get a b"] {
        let command = Command::parse(line);
        assert!(matches!(command, Command::Invalid { .. }), "line {line:?}");
        assert!(command.usage_error().is_some(), "line {line:?}");
        assert!(matches!(engine.execute(&command), Outcome::Error(_)));
    }
    assert_eq!(run(&mut engine, "list"), Outcome::Ok(Payload::Records(vec![])));
}
