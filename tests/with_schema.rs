//! Writes of every value kind against a live MySQL server.
//!
//! Reads come back raw: decimals and JSON structures as text, booleans as
//! integers.

use chrono::{NaiveDate, NaiveDateTime};
use norm_core::{row, FilterNode, Query, Row, Schema, Value};
use norm_mysql::testing::{create_mysql_config, drop_table, init_tracing, recreate_table};
use rust_decimal::Decimal;
use std::str::FromStr;

const COLUMNS: &str = "id INT AUTO_INCREMENT, nbig VARCHAR(100), nboolean INT, \
     ndatetime DATETIME, ndouble DOUBLE, ninteger INT, nlist TEXT, nmap TEXT, \
     nstring VARCHAR(100), nfield VARCHAR(100), PRIMARY KEY (id)";

const SCHEMA: &str = r#"
tables:
  - name: schema_foo
    fields:
      - { name: nbig, type: big }
      - { name: nboolean, type: boolean }
      - { name: ndatetime, type: datetime }
      - { name: ndouble, type: double }
      - { name: ninteger, type: integer }
      - { name: nlist, type: list }
      - { name: nmap, type: map }
      - { name: nstring, type: string }
"#;

fn datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn full_row() -> Row {
    let mut nmap = Row::new();
    nmap.insert("foo".to_string(), Value::from("bar"));

    let mut r = row([
        ("nbig", Value::from(Decimal::from_str("12.34").unwrap())),
        ("nboolean", Value::Bool(false)),
        ("ndatetime", Value::from(datetime("2018-11-21 00:00:00"))),
        ("ndouble", Value::Float(1.234)),
        ("ninteger", Value::Int(1234)),
        ("nstring", Value::from("foobar")),
        ("nfield", Value::from("custom-field")),
    ]);
    r.insert(
        "nlist".to_string(),
        Value::Array(vec![Value::from("foo"), Value::from("bar")]),
    );
    r.insert("nmap".to_string(), Value::Object(nmap));
    r
}

#[tokio::test]
#[ignore = "Requires a MySQL server at MYSQL_TEST_URL"]
async fn test_insert_and_read_raw() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let config = create_mysql_config();
    let mut conn = config.raw_conn().await?;
    recreate_table(&mut conn, "schema_raw", COLUMNS).await?;

    let mut adapter = config.adapter()?;
    let outcome = adapter.insert("schema_raw", None, vec![full_row()]).await?;
    assert_eq!(outcome.affected, 1);

    let rows = adapter.load(&Query::new("schema_raw")).await?;
    assert_eq!(rows.len(), 1);
    let r = &rows[0];
    assert_eq!(r["nbig"], Value::from("12.34"));
    assert_eq!(r["nboolean"], Value::Int(0));
    assert_eq!(r["ndatetime"], Value::DateTime(datetime("2018-11-21 00:00:00")));
    assert_eq!(r["ndouble"], Value::Float(1.234));
    assert_eq!(r["ninteger"], Value::Int(1234));
    assert_eq!(r["nlist"], Value::from(r#"["foo","bar"]"#));
    assert_eq!(r["nmap"], Value::from(r#"{"foo":"bar"}"#));
    assert_eq!(r["nfield"], Value::from("custom-field"));
    adapter.end().await?;

    drop_table(&mut conn, "schema_raw").await?;
    Ok(())
}

#[tokio::test]
#[ignore = "Requires a MySQL server at MYSQL_TEST_URL"]
async fn test_update_every_kind() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let config = create_mysql_config();
    let mut conn = config.raw_conn().await?;
    recreate_table(&mut conn, "schema_update", COLUMNS).await?;

    let mut adapter = config.adapter()?;
    adapter
        .insert("schema_update", None, vec![row([("nstring", "before")])])
        .await?;

    let query = Query::new("schema_update").filter(FilterNode::eq("id", 1));
    let affected = adapter.update(&query, &full_row()).await?;
    assert_eq!(affected, 1);

    let rows = adapter.load(&query).await?;
    assert_eq!(rows[0]["nstring"], Value::from("foobar"));
    assert_eq!(rows[0]["nbig"], Value::from("12.34"));
    adapter.end().await?;

    drop_table(&mut conn, "schema_update").await?;
    Ok(())
}

#[tokio::test]
#[ignore = "Requires a MySQL server at MYSQL_TEST_URL"]
async fn test_declared_fields_fill_missing_with_null() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let config = create_mysql_config();
    let mut conn = config.raw_conn().await?;
    drop_table(&mut conn, "schema_foo").await?;

    let schema = Schema::from_yaml(SCHEMA)?;
    let decl = schema.table("schema_foo")?;

    let mut adapter = config.adapter()?;
    adapter.define(decl).await?;

    let outcome = adapter
        .insert(
            "schema_foo",
            Some(decl),
            vec![
                row([("nbig", Value::from(Decimal::from_str("12.34").unwrap()))]),
                row([("ndatetime", Value::from(NaiveDate::from_ymd_opt(2019, 2, 6).unwrap()))]),
            ],
        )
        .await?;
    assert_eq!(outcome.affected, 2);
    assert_eq!(outcome.ids(), vec![1, 2]);

    let rows = adapter.load(&Query::new("schema_foo")).await?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["nstring"], Value::Null);
    assert_eq!(rows[0]["nbig"], Value::from("12.340000000000000000000000000000"));
    assert_eq!(rows[1]["ndatetime"], Value::DateTime(datetime("2019-02-06 00:00:00")));

    adapter.undefine("schema_foo").await?;
    adapter.end().await?;
    Ok(())
}
