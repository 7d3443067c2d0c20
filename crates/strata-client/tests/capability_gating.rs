//! Capability-gated operations: skipped when the prerequisite is absent,
//! run with the resolved value when it is present.

use strata_client::capability::{evaluate, Capability};
use strata_client::{ClientConfig, Connection};
use strata_frame::ColumnData;

/// Endpoint of a live ClickHouse HTTP server, for opt-in integration runs.
const LIVE_ENDPOINT: Capability = Capability::Env("CLICKHOUSE_HTTP_TESTING_ENDPOINT");

#[test]
fn live_server_fetch_is_gated_on_the_configured_endpoint() {
    let Some(endpoint) = evaluate(&LIVE_ENDPOINT).into_value() else {
        eprintln!("skipping: CLICKHOUSE_HTTP_TESTING_ENDPOINT is not set");
        return;
    };

    let mut conn = Connection::open(ClientConfig::new(endpoint)).unwrap();
    let frame = conn.query_fetch("select 25 as col1").unwrap();
    assert_eq!(frame.column("col1"), Some(&ColumnData::UInt8(vec![25])));
    conn.close();
}

#[test]
fn dataframe_conversion_is_gated_on_the_polars_feature() {
    if evaluate(&Capability::Feature("polars")).into_value().is_none() {
        eprintln!("skipping: optional feature 'polars' is not compiled in");
        return;
    }

    #[cfg(feature = "polars")]
    {
        use strata_frame::{Column, ColumnarFrame};

        let frame = ColumnarFrame::try_new(vec![Column::new(
            "col1",
            ColumnData::UInt8(vec![25]),
        )])
        .unwrap();
        let df = frame.into_dataframe().unwrap();
        assert_eq!(df.shape(), (1, 1));
    }
}

#[test]
fn gate_outcomes_are_stable_within_a_process_state() {
    assert_eq!(evaluate(&LIVE_ENDPOINT), evaluate(&LIVE_ENDPOINT));
}
