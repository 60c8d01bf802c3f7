use pretty_assertions::assert_eq;
use tests::prelude::*;

async fn connect_by_url(_test: &mut SqlTableTest) {
    for url in ["mysql://localhost/test", "postgresql://localhost/test"] {
        let err = Db::connect(url).await.unwrap_err();
        assert!(err.is_driver_unavailable(), "{url}: {err}");
    }

    let err = Db::connect("nosuchdb://localhost").await.unwrap_err();
    assert!(err.is_invalid_connection_url());

    let err = Db::connect("not a url").await.unwrap_err();
    assert!(err.is_invalid_connection_url());

    let db = Db::connect("sqlite::memory:").await.unwrap();
    assert_eq!(db.driver().url(), "sqlite::memory:");
    assert!(!db.table_exists(SEQS).await.unwrap());
}

async fn setup_primitives(test: &mut SqlTableTest) {
    let db = test.setup_db().await;

    assert!(!db.table_exists(SEQS).await.unwrap());
    load_fixture(&db).await.unwrap();
    assert!(db.table_exists(SEQS).await.unwrap());

    let rows = db
        .query(
            "SELECT seq_id FROM sqltable_test WHERE start >= ? ORDER BY primary_id",
            vec![Value::I64(5)],
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], Value::from("seq2"));

    // Loading again starts over
    load_fixture(&db).await.unwrap();
    assert_eq!(Table::open(&db, SEQS).await.unwrap().len().await.unwrap(), 2);

    db.drop_table(SEQS).await.unwrap();
    assert!(!db.table_exists(SEQS).await.unwrap());
}

async fn table_builder_runs_ddl(test: &mut SqlTableTest) {
    let db = test.setup_db().await;
    let ddl = "CREATE TABLE tagged (tag_key INTEGER PRIMARY KEY {AUTO_INCREMENT}, label TEXT)";

    for _ in 0..2 {
        let tagged = Table::builder(&db, "tagged")
            .writeable(true)
            .drop_if_exists(true)
            .create(ddl)
            .open()
            .await
            .unwrap();

        // Recreated each time, so keys start over
        let row = tagged.create().set("label", "x").exec().await.unwrap();
        assert_eq!(row.id(), Value::I64(1));
        assert_eq!(row.get("tag_key").unwrap(), row.id());
    }
}

async fn rollback_discards_writes(test: &mut SqlTableTest) {
    let db = test.setup_fixture().await;
    let seqs = open_table(&db, SEQS, true).await;

    db.begin().await.unwrap();
    seqs.delete(1_i64).await.unwrap();
    assert!(!seqs.contains(1_i64).await.unwrap());
    db.rollback().await.unwrap();

    assert!(seqs.contains(1_i64).await.unwrap());
    assert_eq!(
        seqs.get(1_i64).await.unwrap().get_as::<String>("seq_id").unwrap(),
        "seq1"
    );

    db.begin().await.unwrap();
    seqs.delete(2_i64).await.unwrap();
    db.commit().await.unwrap();
    assert!(!seqs.contains(2_i64).await.unwrap());
}

async fn failed_statements_are_driver_errors(test: &mut SqlTableTest) {
    let db = test.setup_fixture().await;

    let err = db.query("SELECT nope FROM nowhere", vec![]).await.unwrap_err();
    assert!(err.is_driver_operation_failed());
    assert!(!err.is_record_not_found());

    // The connection is still usable
    assert_eq!(Table::open(&db, SEQS).await.unwrap().len().await.unwrap(), 2);
}

tests!(
    connect_by_url,
    setup_primitives,
    table_builder_runs_ddl,
    rollback_discards_writes,
    failed_statements_are_driver_errors,
);
