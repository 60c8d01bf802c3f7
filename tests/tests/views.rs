use pretty_assertions::assert_eq;
use tests::prelude::*;

const JOIN: &str = "SELECT t2.third_id FROM sqltable_test1 t1, sqltable_test2 t2 \
                    WHERE t1.my_id = ? AND t1.other_id = t2.other_id \
                    ORDER BY t2.third_id";

fn ids(rows: &[Row]) -> Vec<Value> {
    rows.iter().map(Row::id).collect()
}

async fn map_view_lookups(test: &mut SqlTableTest) {
    let db = test.setup_fixture().await;
    let test1 = Table::open(&db, TEST1).await.unwrap();
    let test2 = Table::open(&db, TEST2).await.unwrap();
    let map = MapView::new(&test1, &test2, JOIN);

    let source = test1.get(2_i64).await.unwrap();
    let target = map.get(&source).await.unwrap();
    assert_eq!(target.id(), Value::I64(7));
    assert!(Row::ptr_eq(&target, &test2.get(7_i64).await.unwrap()));

    let source = test1.get(3_i64).await.unwrap();
    assert_eq!(map.get(&source).await.unwrap().id(), Value::I64(99));

    assert!(map.contains(&test1.get(2_i64).await.unwrap()).await.unwrap());
    assert_eq!(map.source().name(), TEST1);
    assert_eq!(map.target().name(), TEST2);
}

async fn map_view_refuses_ambiguity(test: &mut SqlTableTest) {
    let db = test.setup_fixture().await;
    let test1 = Table::open(&db, TEST1).await.unwrap();
    let test2 = Table::open(&db, TEST2).await.unwrap();
    let map = MapView::new(&test1, &test2, JOIN);

    let source = test1.get(4_i64).await.unwrap();
    let err = map.get(&source).await.unwrap_err();
    assert!(err.is_non_unique_mapping());

    // Ambiguous or not, a mapping exists
    assert!(map.contains(&source).await.unwrap());
}

async fn map_view_without_mapping(test: &mut SqlTableTest) {
    let db = test.setup_fixture().await;
    db.execute("INSERT INTO sqltable_test1 VALUES (5, 'seq5')", vec![])
        .await
        .unwrap();

    let test1 = Table::open(&db, TEST1).await.unwrap();
    let test2 = Table::open(&db, TEST2).await.unwrap();
    let map = MapView::new(&test1, &test2, JOIN);

    let source = test1.get(5_i64).await.unwrap();
    let err = map.get(&source).await.unwrap_err();
    assert!(err.is_record_not_found());
    assert!(!map.contains(&source).await.unwrap());

    // Rows of the target table are not valid sources
    let wrong = test2.get(7_i64).await.unwrap();
    assert!(map.get(&wrong).await.is_err());
}

async fn graph_view_lookups(test: &mut SqlTableTest) {
    let db = test.setup_fixture().await;
    let test1 = Table::open(&db, TEST1).await.unwrap();
    let test2 = Table::open(&db, TEST2).await.unwrap();
    let graph = GraphView::new(&test1, &test2, JOIN);

    let source = test1.get(4_i64).await.unwrap();
    let targets = graph.get(&source).await.unwrap();
    assert_eq!(ids(&targets), [Value::I64(6), Value::I64(8)]);
    assert!(Row::ptr_eq(&targets[1], &test2.get(8_i64).await.unwrap()));

    let source = test1.get(2_i64).await.unwrap();
    assert_eq!(ids(&graph.get(&source).await.unwrap()), [Value::I64(7)]);
    assert!(graph.contains(&source).await.unwrap());

    db.execute("INSERT INTO sqltable_test1 VALUES (5, 'seq5')", vec![])
        .await
        .unwrap();
    let lonely = test1.get(5_i64).await.unwrap();
    assert!(graph.get(&lonely).await.unwrap().is_empty());
    assert!(!graph.contains(&lonely).await.unwrap());
}

async fn graph_view_follows_rank_order(test: &mut SqlTableTest) {
    let db = test.setup_fixture().await;
    db.create_table("CREATE TABLE sqltable_rank (source INTEGER, target INTEGER, rank INTEGER)")
        .await
        .unwrap();
    for (target, rank) in [(6, 3), (99, 1), (8, 2), (7, 4)] {
        db.execute(
            "INSERT INTO sqltable_rank VALUES (4, ?, ?)",
            vec![Value::I64(target), Value::I64(rank)],
        )
        .await
        .unwrap();
    }

    let test1 = Table::open(&db, TEST1).await.unwrap();
    let test2 = Table::open(&db, TEST2).await.unwrap();
    let source = test1.get(4_i64).await.unwrap();

    let ranked = GraphView::new(
        &test1,
        &test2,
        "SELECT target FROM sqltable_rank WHERE source = ? ORDER BY rank",
    );
    let expect = [Value::I64(99), Value::I64(8), Value::I64(6), Value::I64(7)];
    for _ in 0..3 {
        assert_eq!(ids(&ranked.get(&source).await.unwrap()), expect);
    }

    let reversed = GraphView::new(
        &test1,
        &test2,
        "SELECT target FROM sqltable_rank WHERE source = ? ORDER BY rank DESC",
    );
    let mut expect = expect;
    expect.reverse();
    assert_eq!(ids(&reversed.get(&source).await.unwrap()), expect);
}

tests!(
    map_view_lookups,
    map_view_refuses_ambiguity,
    map_view_without_mapping,
    graph_view_lookups,
    graph_view_follows_rank_order,
);
