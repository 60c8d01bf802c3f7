use pretty_assertions::assert_eq;
use tests::prelude::*;

async fn keys_len_and_contains(test: &mut SqlTableTest) {
    let db = test.setup_fixture().await;
    let seqs = Table::open(&db, SEQS).await.unwrap();

    assert!(!seqs.is_writeable());
    assert_eq!(seqs.schema().primary_key().name, "primary_id");

    assert_eq!(seqs.keys().await.unwrap(), [Value::I64(1), Value::I64(2)]);
    assert_eq!(seqs.len().await.unwrap(), 2);
    assert!(!seqs.is_empty().await.unwrap());

    assert!(seqs.contains(1_i64).await.unwrap());
    assert!(seqs.contains(2_i64).await.unwrap());
    assert!(!seqs.contains(3_i64).await.unwrap());
}

async fn get_and_find(test: &mut SqlTableTest) {
    let db = test.setup_fixture().await;
    let seqs = Table::open(&db, SEQS).await.unwrap();

    let row = seqs.get(1_i64).await.unwrap();
    assert_eq!(row.id(), Value::I64(1));
    assert_eq!(row.get("primary_id").unwrap(), Value::I64(1));
    assert_eq!(row.get_as::<String>("seq_id").unwrap(), "seq1");
    assert_eq!(row.get_as::<i64>("start").unwrap(), 0);
    assert_eq!(row.get_as::<i64>("stop").unwrap(), 10);
    assert_eq!(row.table_name(), SEQS);

    let err = seqs.get(3_i64).await.unwrap_err();
    assert!(err.is_record_not_found());

    assert!(seqs.find(3_i64).await.unwrap().is_none());
    assert!(seqs.find(2_i64).await.unwrap().is_some());

    let fallback = seqs.get(2_i64).await.unwrap();
    let got = seqs.get_or(3_i64, fallback.clone()).await.unwrap();
    assert!(Row::ptr_eq(&got, &fallback));

    let got = seqs.get_or(1_i64, fallback).await.unwrap();
    assert!(Row::ptr_eq(&got, &row));
}

async fn cached_rows_keep_identity(test: &mut SqlTableTest) {
    let db = test.setup_fixture().await;
    let seqs = Table::open(&db, SEQS).await.unwrap();

    let first = seqs.get(1_i64).await.unwrap();
    let queries = test.log().len();

    let again = seqs.get(1_i64).await.unwrap();
    assert!(Row::ptr_eq(&first, &again));
    // Served from the cache
    assert_eq!(test.log().len(), queries);

    let values = seqs.values().await.unwrap();
    assert!(Row::ptr_eq(&values[0], &first));

    // A second table over the same SQL table has its own cache
    let other = Table::open(&db, SEQS).await.unwrap();
    let copy = other.get(1_i64).await.unwrap();
    assert!(!Row::ptr_eq(&copy, &first));
    assert_eq!(copy, first);
}

async fn items_and_lazy_forms_agree(test: &mut SqlTableTest) {
    let db = test.setup_fixture().await;
    let seqs = Table::open(&db, SEQS).await.unwrap();

    let items = seqs.items().await.unwrap();
    let keys = items.iter().map(|(key, _)| key.clone()).collect::<Vec<_>>();
    assert_eq!(keys, [Value::I64(1), Value::I64(2)]);
    for (key, row) in &items {
        assert_eq!(&row.id(), key);
    }

    let lazy_keys: Vec<Value> = seqs.iter_keys().collect().await.unwrap();
    assert_eq!(lazy_keys, keys);

    let lazy_values: Vec<Row> = seqs.iter_values().collect().await.unwrap();
    assert_eq!(lazy_values.len(), 2);
    for (lazy, (_, eager)) in lazy_values.iter().zip(&items) {
        assert!(Row::ptr_eq(lazy, eager));
    }

    let lazy_items: Vec<(Value, Row)> = seqs.iter_items().collect().await.unwrap();
    assert_eq!(lazy_items, items);
}

async fn read_only_rejects_writes(test: &mut SqlTableTest) {
    let db = test.setup_fixture().await;
    let seqs = Table::open(&db, SEQS).await.unwrap();
    let row = seqs.get(1_i64).await.unwrap();

    test.log().clear();

    let err = seqs.create().set("seq_id", "nope").exec().await.unwrap_err();
    assert!(err.is_write_not_permitted());

    let err = seqs.set(5_i64, &row).await.unwrap_err();
    assert!(err.is_write_not_permitted());

    let err = seqs.delete(1_i64).await.unwrap_err();
    assert!(err.is_write_not_permitted());

    let err = seqs.set_attribute(&row, "start", 99_i64).await.unwrap_err();
    assert!(err.is_write_not_permitted());

    // Nothing reached the store
    assert!(test.log().is_empty());

    assert_eq!(row.id(), Value::I64(1));
    assert_eq!(row.get_as::<i64>("start").unwrap(), 0);
    assert_eq!(seqs.len().await.unwrap(), 2);
    assert!(!test.log().has_write());
    assert!(test
        .log()
        .statements()
        .iter()
        .all(|sql| sql.starts_with("SELECT")));
}

async fn uncached_table_reads_fresh_rows(test: &mut SqlTableTest) {
    let db = test.setup_fixture().await;
    let seqs = Table::builder(&db, SEQS).cache(false).open().await.unwrap();

    let first = seqs.get(1_i64).await.unwrap();
    let again = seqs.get(1_i64).await.unwrap();

    assert!(!Row::ptr_eq(&first, &again));
    assert_eq!(first, again);
    assert_eq!(test.log().count(|op| op.sql().is_some()), 2);

    let keys: Vec<Value> = seqs.iter_keys().collect().await.unwrap();
    assert_eq!(keys, seqs.keys().await.unwrap());
}

async fn id_and_aliases(test: &mut SqlTableTest) {
    let db = test.setup_fixture().await;
    let seqs = Table::builder(&db, SEQS)
        .alias("name", "seq_id")
        .open()
        .await
        .unwrap();

    let row = seqs.get(2_i64).await.unwrap();
    assert_eq!(row.get("id").unwrap(), row.get("primary_id").unwrap());
    assert_eq!(row.get_as::<String>("name").unwrap(), "seq2");

    let err = row.get("missing").unwrap_err();
    assert!(err.is_invalid_schema());

    let err = Table::builder(&db, SEQS)
        .alias("name", "missing")
        .open()
        .await
        .unwrap_err();
    assert!(err.is_invalid_schema());

    let err = Table::open(&db, "no_such_table").await.unwrap_err();
    assert!(err.is_invalid_schema());
}

tests!(
    keys_len_and_contains,
    get_and_find,
    cached_rows_keep_identity,
    items_and_lazy_forms_agree,
    read_only_rejects_writes,
    uncached_table_reads_fresh_rows,
    id_and_aliases,
);
