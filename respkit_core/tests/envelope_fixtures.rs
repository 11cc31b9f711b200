use std::path::Path;

use respkit_core::{ListEnvelope, Response, StatusResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Company {
    id: i64,
    name: String,
    year_founded: i32,
}

fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read fixture {}: {}", path.display(), e))
}

#[test]
fn company_page_deserializes_flat() {
    let list: ListEnvelope<Company> =
        serde_json::from_str(&load_fixture("company_page.json")).unwrap();

    assert!(list.is_success());
    assert_eq!(*list.code(), 200);
    assert_eq!(list.trace_id(), Some("req-7f3a"));
    assert_eq!(list.total(), 3);
    assert_eq!(list.page_index(), 1);
    assert_eq!(list.page_size(), 2);
    assert_eq!(list.total_pages(), 2);
    assert!(list.has_next_page());
    assert_eq!(
        list.items().iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![1, 4]
    );
    assert_eq!(list.items()[1].name, "Compannny 4");
    assert_eq!(list.items()[1].year_founded, 2024);
}

#[test]
fn validation_failure_deserializes() {
    let resp: Response = serde_json::from_str(&load_fixture("validation_failure.json")).unwrap();

    assert!(!resp.is_success());
    assert!(resp.is_client_error());
    assert_eq!(resp.message(), Some("validation failed"));
    let errors = resp.validation_errors().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors.get("name"),
        Some(&["input is empty after sanitization".to_string()][..])
    );
    assert!(resp.data().is_none());
    assert!(resp.ensure_success().is_err());
}

#[test]
fn numeric_fixture_code_reads_as_http_status() {
    let resp: StatusResponse =
        serde_json::from_str(&load_fixture("validation_failure.json")).unwrap();
    assert_eq!(resp.code().0, http::StatusCode::BAD_REQUEST);
}

#[test]
fn success_flag_follows_code_when_loading() {
    let resp: Response<i32> = serde_json::from_str(
        r#"{"success":true,"code":404,"generatedAt":"2025-03-14T09:26:53Z","data":7}"#,
    )
    .unwrap();

    assert!(!resp.is_success());
    assert!(resp.is_client_error());
    assert!(resp.data().is_none());
    assert!(resp.ensure_success().is_err());
}

#[test]
fn success_envelope_drops_validation_errors_when_loading() {
    let resp: Response<i32> = serde_json::from_str(
        r#"{"success":false,"code":200,"generatedAt":"2025-03-14T09:26:53Z","data":7,"validationErrors":{"name":["bad"]}}"#,
    )
    .unwrap();

    assert!(resp.is_success());
    assert_eq!(resp.data(), Some(&7));
    assert!(resp.validation_errors().is_none());
}

#[test]
fn loaded_list_total_covers_its_items() {
    let list: ListEnvelope<i32> = serde_json::from_str(
        r#"{"success":true,"code":200,"generatedAt":"2025-03-14T09:26:53Z","items":[1,2,3],"total":1,"pageIndex":1,"pageSize":3}"#,
    )
    .unwrap();

    assert_eq!(list.items(), &[1, 2, 3]);
    assert_eq!(list.total(), 3);
}

#[test]
fn loaded_failure_list_has_no_items() {
    let list: ListEnvelope<i32> = serde_json::from_str(
        r#"{"success":true,"code":500,"generatedAt":"2025-03-14T09:26:53Z","items":[1,2],"total":2,"pageIndex":1,"pageSize":2}"#,
    )
    .unwrap();

    assert!(!list.is_success());
    assert!(list.items().is_empty());
    assert_eq!(list.total(), 2);
}
