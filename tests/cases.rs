//! Basic operation cases against a live MySQL server.
//!
//! Each test seeds its own six-row table (`foo` = pre1..pre6) so the tests can
//! run in parallel.

use norm_core::{row, Direction, FilterNode, Query, Value};
use norm_mysql::testing::{create_mysql_config, drop_table, init_tracing, seed_cases_table, select_all};

#[tokio::test]
#[ignore = "Requires a MySQL server at MYSQL_TEST_URL"]
async fn test_create_new_record() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let config = create_mysql_config();
    let mut conn = config.raw_conn().await?;
    seed_cases_table(&mut conn, "cases_create").await?;

    let mut adapter = config.adapter()?;
    let outcome = adapter
        .insert(
            "cases_create",
            None,
            vec![row([("foo", "bar")]), row([("bar", "baz")])],
        )
        .await?;
    adapter.end().await?;

    assert_eq!(outcome.affected, 2);
    assert_eq!(outcome.rows.len(), 2);
    assert_eq!(outcome.ids(), vec![7, 8]);

    let rows = select_all(&mut conn, "cases_create").await?;
    assert_eq!(rows.len(), 8);
    assert_eq!(rows[7].get::<Option<String>, _>("bar"), Some(Some("baz".to_string())));

    drop_table(&mut conn, "cases_create").await?;
    Ok(())
}

#[tokio::test]
#[ignore = "Requires a MySQL server at MYSQL_TEST_URL"]
async fn test_rollback_discards_insert() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let config = create_mysql_config();
    let mut conn = config.raw_conn().await?;
    seed_cases_table(&mut conn, "cases_rollback").await?;

    let mut adapter = config.adapter()?;
    adapter.begin().await?;
    let outcome = adapter
        .insert("cases_rollback", None, vec![row([("foo", "bar")])])
        .await?;
    assert_eq!(outcome.affected, 1);
    adapter.rollback().await?;
    adapter.end().await?;

    assert_eq!(select_all(&mut conn, "cases_rollback").await?.len(), 6);

    drop_table(&mut conn, "cases_rollback").await?;
    Ok(())
}

#[tokio::test]
#[ignore = "Requires a MySQL server at MYSQL_TEST_URL"]
async fn test_read_update_delete() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let config = create_mysql_config();
    let mut conn = config.raw_conn().await?;
    seed_cases_table(&mut conn, "cases_rud").await?;

    let mut adapter = config.adapter()?;
    assert_eq!(adapter.load(&Query::new("cases_rud")).await?.len(), 6);

    let affected = adapter
        .update(
            &Query::new("cases_rud").filter(FilterNode::eq("id", 2)),
            &row([("foo", "bar")]),
        )
        .await?;
    assert_eq!(affected, 1);

    let rows = adapter
        .load(&Query::new("cases_rud").filter(FilterNode::eq("id", 2)))
        .await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["foo"], Value::from("bar"));
    assert_eq!(rows[0]["bar"], Value::Null);

    let deleted = adapter.delete(&Query::new("cases_rud")).await?;
    assert_eq!(deleted, 6);
    assert!(adapter.load(&Query::new("cases_rud")).await?.is_empty());
    adapter.end().await?;

    drop_table(&mut conn, "cases_rud").await?;
    Ok(())
}

#[tokio::test]
#[ignore = "Requires a MySQL server at MYSQL_TEST_URL"]
async fn test_count_and_pagination() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let config = create_mysql_config();
    let mut conn = config.raw_conn().await?;
    seed_cases_table(&mut conn, "cases_page").await?;

    let mut adapter = config.adapter()?;
    let all = Query::new("cases_page");
    assert_eq!(adapter.count(&all, false).await?, 6);
    assert_eq!(adapter.load(&all).await?.len(), 6);

    let window = Query::new("cases_page").limit(1).skip(3);
    assert_eq!(adapter.load(&window).await?.len(), 1);
    assert_eq!(adapter.count(&window, true).await?, 1);
    assert_eq!(adapter.count(&window, false).await?, 6);

    // offset without limit falls back to LIMIT 1000
    let offset_only = Query::new("cases_page").skip(3);
    assert_eq!(adapter.load(&offset_only).await?.len(), 3);
    adapter.end().await?;

    drop_table(&mut conn, "cases_page").await?;
    Ok(())
}

#[tokio::test]
#[ignore = "Requires a MySQL server at MYSQL_TEST_URL"]
async fn test_like_and_sort() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let config = create_mysql_config();
    let mut conn = config.raw_conn().await?;
    seed_cases_table(&mut conn, "cases_like").await?;

    let mut adapter = config.adapter()?;
    let rows = adapter
        .load(&Query::new("cases_like").filter(FilterNode::like("foo", "re")))
        .await?;
    assert_eq!(rows.len(), 6);

    let rows = adapter
        .load(&Query::new("cases_like").filter(FilterNode::like("foo", "e3")))
        .await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["foo"], Value::from("pre3"));

    let rows = adapter
        .load(
            &Query::new("cases_like")
                .filter(FilterNode::gt("id", 2))
                .sort("foo", Direction::Desc)
                .limit(2),
        )
        .await?;
    let foos: Vec<_> = rows.iter().map(|r| r["foo"].clone()).collect();
    assert_eq!(foos, vec![Value::from("pre6"), Value::from("pre5")]);
    adapter.end().await?;

    drop_table(&mut conn, "cases_like").await?;
    Ok(())
}
