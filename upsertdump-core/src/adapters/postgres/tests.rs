//! Unit tests for PostgreSQL adapter.

use super::*;
use crate::error::UpsertDumpError;
use crate::models::Column;
use crate::security::Credentials;
use std::path::PathBuf;
use std::time::Duration;

fn table(schema: &str, name: &str, columns: &[&str]) -> TableDescriptor {
    TableDescriptor {
        schema: schema.to_string(),
        name: name.to_string(),
        columns: columns.iter().map(|c| Column::new(*c, "text")).collect(),
        primary_key: Vec::new(),
    }
}

#[test]
fn test_connect_options_tcp_host() {
    let config = ConnectionConfig::new("inventory".to_string())
        .with_host("db.example.com".to_string())
        .with_port(6543)
        .with_username("exporter".to_string());
    let options = PostgresAdapter::connect_options(&config, &Credentials::default());

    assert_eq!(options.get_host(), "db.example.com");
    assert_eq!(options.get_port(), 6543);
    assert_eq!(options.get_database(), Some("inventory"));
    assert_eq!(options.get_username(), "exporter");
    assert_eq!(options.get_socket(), None);
}

#[test]
fn test_connect_options_socket_directory() {
    let config = ConnectionConfig::new("inventory".to_string());
    let options = PostgresAdapter::connect_options(&config, &Credentials::default());

    assert_eq!(
        options.get_socket(),
        Some(&PathBuf::from("/var/run/postgresql"))
    );
    assert_eq!(options.get_port(), 5432);
}

#[test]
fn test_build_select_query_quotes_everything() {
    let query = build_select_query(&table("Sales", "order", &["id", "Total", "we\"ird"]));
    assert_eq!(
        query,
        r#"SELECT "id"::text, "Total"::text, "we""ird"::text FROM "Sales"."order""#
    );
}

#[test]
fn test_build_select_query_keeps_column_order() {
    let query = build_select_query(&table("public", "t", &["b", "a", "c"]));
    assert_eq!(
        query,
        r#"SELECT "b"::text, "a"::text, "c"::text FROM "public"."t""#
    );
}

#[tokio::test]
async fn test_connect_rejects_invalid_config() {
    let config = ConnectionConfig::new(String::new());
    let result = PostgresAdapter::connect(config, &Credentials::default(), None).await;

    assert!(matches!(
        result.unwrap_err(),
        UpsertDumpError::Configuration { .. }
    ));
}

#[tokio::test]
async fn test_connect_fails_gracefully() {
    // Nothing listens on the discard port
    let config = ConnectionConfig::new("invalid".to_string())
        .with_host("127.0.0.1".to_string())
        .with_port(9)
        .with_username("invalid".to_string())
        .with_connect_timeout(Duration::from_secs(5));
    let credentials = Credentials::new(Some("super-secret".to_string()));

    let err = PostgresAdapter::connect(config, &credentials, None)
        .await
        .unwrap_err();

    assert!(err.is_connection_error());
    let message = err.report();
    assert!(message.contains("127.0.0.1:9/invalid"));
    assert!(!message.contains("super-secret"));
    // The driver's reason follows the target
    assert!(message.len() > err.to_string().len());
}
