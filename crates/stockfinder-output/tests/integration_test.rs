//! Integration tests for the search-then-export workflow.

use serde_json::json;
use stockfinder_output::{
    ExportFormat, ExportRequest, Exporter, FIELD_ORDER, SearchResponse, TransformedRecord,
};

fn response() -> SearchResponse {
    SearchResponse::new(vec![
        TransformedRecord {
            name: json!("Acme Corp"),
            code: json!("ACME"),
            exchange: json!("NYSE"),
            country: json!("USA"),
            revenue: json!(2_500_000),
            return_on_equity: json!(0.21),
            revenue_growth: Some("14.5%".to_string()),
            earnings_growth: Some("9.1%".to_string()),
            ..Default::default()
        },
        TransformedRecord {
            name: json!("Beta Ltd"),
            code: json!("BETA"),
            revenue: json!("1,200,000"),
            ..Default::default()
        },
    ])
}

#[test]
fn test_response_round_trips_through_client() {
    // A results page receives the JSON response and posts its rows back.
    let json = response().export_to_string(ExportFormat::Json).unwrap();
    let received: serde_json::Value = serde_json::from_str(&json).unwrap();

    let request: ExportRequest = serde_json::from_value(json!({
        "data": received["data"],
        "fieldOrder": received["fieldOrder"],
    }))
    .unwrap();

    let csv = request.export_to_string(ExportFormat::Csv).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next().unwrap(), FIELD_ORDER.join(","));
    assert_eq!(
        lines.next().unwrap(),
        "Acme Corp,ACME,NYSE,USA,2500000,0.21,14.5%,9.1%,,"
    );
    assert_eq!(lines.next().unwrap(), "Beta Ltd,BETA,,,\"1,200,000\",,,,,");
}

#[test]
fn test_direct_csv_matches_client_export() {
    let direct = response().export_to_string(ExportFormat::Csv).unwrap();
    let records = response().data;
    assert_eq!(direct, records.export_to_string(ExportFormat::Csv).unwrap());
}

#[test]
fn test_response_deserializes() {
    let json = response().export_to_string(ExportFormat::PrettyJson).unwrap();
    let parsed: SearchResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, response());
}
