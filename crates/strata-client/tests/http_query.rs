//! End-to-end query tests against a mocked ClickHouse HTTP endpoint.
//!
//! The blocking `Connection` bridges onto the ambient runtime from a
//! worker thread, so these tests need a multi-threaded runtime to keep
//! the mock server responsive.

use strata_client::{ClientConfig, ClientError, Connection, MaterializeError};
use strata_frame::ColumnData;
use wiremock::matchers::{body_string, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_query(server: &MockServer, sql: &str, response: &str) {
    Mock::given(method("POST"))
        .and(body_string(format!("{sql} FORMAT JSONCompact")))
        .respond_with(ResponseTemplate::new(200).set_body_string(response))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn select_literal_materializes_to_one_cell() {
    let server = MockServer::start().await;
    mock_query(
        &server,
        "select 25 as col1",
        r#"{"meta":[{"name":"col1","type":"UInt8"}],"data":[[25]],"rows":1}"#,
    )
    .await;

    let mut conn = Connection::open(ClientConfig::new(server.uri())).unwrap();
    let stream = conn.execute("select 25 as col1").unwrap();
    let names: Vec<&str> = stream.column_names().iter().map(String::as_str).collect();
    assert_eq!(names, ["col1"]);

    let frame = stream.materialize().unwrap();
    assert_eq!(frame.num_rows(), 1);
    assert_eq!(frame.column("col1"), Some(&ColumnData::UInt8(vec![25])));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn trailing_semicolon_is_dropped() {
    let server = MockServer::start().await;
    mock_query(
        &server,
        "select 25 as col1",
        r#"{"meta":[{"name":"col1","type":"UInt8"}],"data":[[25]]}"#,
    )
    .await;

    let mut conn = Connection::open(ClientConfig::new(server.uri())).unwrap();
    let frame = conn.query_fetch("select 25 as col1;").unwrap();
    assert_eq!(frame.column("col1"), Some(&ColumnData::UInt8(vec![25])));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn zero_rows_keep_declared_columns() {
    let server = MockServer::start().await;
    mock_query(
        &server,
        "select name, size from things where 0",
        r#"{"meta":[{"name":"name","type":"String"},{"name":"size","type":"UInt64"}],"data":[],"rows":0}"#,
    )
    .await;

    let mut conn = Connection::open(ClientConfig::new(server.uri())).unwrap();
    let frame = conn
        .query_fetch("select name, size from things where 0")
        .unwrap();

    assert_eq!(frame.num_rows(), 0);
    let names: Vec<&str> = frame.column_names().collect();
    assert_eq!(names, ["name", "size"]);
    assert!(frame.column("size").unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn mixed_types_decode_per_declared_column() {
    let server = MockServer::start().await;
    mock_query(
        &server,
        "select * from readings",
        r#"{
            "meta": [
                {"name": "id", "type": "UInt64"},
                {"name": "label", "type": "Nullable(String)"},
                {"name": "value", "type": "Float64"}
            ],
            "data": [
                ["9007199254740993", "a", 1.5],
                ["2", null, -0.25]
            ],
            "rows": 2
        }"#,
    )
    .await;

    let mut conn = Connection::open(ClientConfig::new(server.uri())).unwrap();
    let frame = conn.query_fetch("select * from readings").unwrap();

    assert_eq!(
        frame.column("id"),
        Some(&ColumnData::UInt64(vec![9_007_199_254_740_993, 2]))
    );
    assert_eq!(
        frame.column("label"),
        Some(&ColumnData::TextNullable(vec![Some("a".to_string()), None]))
    );
    assert_eq!(
        frame.column("value"),
        Some(&ColumnData::Float64(vec![1.5, -0.25]))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn rejected_query_carries_the_server_diagnostic() {
    let diagnostic = "Code: 62. DB::Exception: Syntax error: failed at position 1";
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string(diagnostic))
        .mount(&server)
        .await;

    let mut conn = Connection::open(ClientConfig::new(server.uri())).unwrap();
    let err = conn.execute("select bogus(").unwrap_err();
    match err {
        ClientError::Query(message) => assert_eq!(message, diagnostic),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unreachable_endpoint_is_a_connection_error() {
    // Nothing listens on this port.
    let mut conn =
        Connection::open(ClientConfig::new("http://127.0.0.1:9/")).unwrap();
    let err = conn.execute("select 1").unwrap_err();
    assert!(matches!(err, ClientError::Connection(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unsupported_declared_type_fails_materialization_contract() {
    let server = MockServer::start().await;
    mock_query(
        &server,
        "select xs from arrays",
        r#"{"meta":[{"name":"xs","type":"Array(UInt8)"}],"data":[[[1,2]]]}"#,
    )
    .await;

    let mut conn = Connection::open(ClientConfig::new(server.uri())).unwrap();
    let err = conn.execute("select xs from arrays").unwrap_err();
    assert!(matches!(
        err,
        ClientError::Materialize(MaterializeError::UnsupportedColumnType(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn execute_statement_sends_the_raw_statement() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string("CREATE TABLE t (x UInt8) ENGINE = Memory"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let mut conn = Connection::open(ClientConfig::new(server.uri())).unwrap();
    conn.execute_statement("CREATE TABLE t (x UInt8) ENGINE = Memory")
        .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn list_tables_reads_system_tables() {
    let server = MockServer::start().await;
    mock_query(
        &server,
        "SELECT name FROM system.tables WHERE database = 'analytics' ORDER BY name",
        r#"{"meta":[{"name":"name","type":"String"}],"data":[["events"],["sessions"]]}"#,
    )
    .await;

    let mut conn = Connection::open(
        ClientConfig::new(server.uri()).with_database("analytics"),
    )
    .unwrap();
    assert_eq!(conn.list_tables().unwrap(), ["events", "sessions"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn ping_runs_a_probe_query() {
    let server = MockServer::start().await;
    mock_query(
        &server,
        "SELECT 1",
        r#"{"meta":[{"name":"1","type":"UInt8"}],"data":[[1]]}"#,
    )
    .await;

    let mut conn = Connection::open(ClientConfig::new(server.uri())).unwrap();
    conn.ping().unwrap();

    conn.close();
    assert!(conn.ping().is_err());
}
