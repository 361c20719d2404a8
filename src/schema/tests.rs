//! Schema catalog tests

use super::*;
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::{json, Value};
use test_case::test_case;

fn task_row_schema() -> RowSchema {
    RowSchema::for_rows()
        .column("Name", row_types::text())
        .column("Estimate", row_types::number())
        .column("Done", row_types::checkbox())
        .column("Status", row_types::single_select(["Open", "Closed"]))
        .column("Tags", row_types::multiple_select(["a", "b", "c"]))
        .column("Screenshots", row_types::image())
        .column("Owner", row_types::email())
        .column("Blockers", row_types::link())
}

fn task_query_schema() -> RowSchema {
    RowSchema::for_query_with_id()
        .column("Name", query_types::text())
        .column("Estimate", query_types::number())
        .column("Done", query_types::checkbox())
        .column("Status", query_types::single_select(["Open", "Closed"]))
        .column("Screenshots", query_types::image())
        .column("Blockers", query_types::link())
}

#[test]
fn test_row_form_round_trip() {
    let row = json!({
        "_id": "AbCdEfGhIjKlMnOpQrStUv",
        "_ctime": "2024-01-01T00:00:00.000+00:00",
        "_mtime": "2024-01-02T00:00:00.000+00:00",
        "Name": "Write report",
        "Estimate": 3.5,
        "Done": true,
        "Status": "Open",
        "Tags": ["a", "c"],
        "Screenshots": ["https://example.com/a.png"],
        "Owner": "jo@example.com",
        "Blockers": ["Zy12ab"]
    });

    let parsed: Value = task_row_schema().parse(row.clone()).unwrap();
    assert_eq!(parsed, row);
}

#[test]
fn test_query_form_round_trip() {
    let row = json!({
        "_id": "AbCdEfGhIjKlMnOpQrStUv",
        "Name": null,
        "Estimate": 2,
        "Done": false,
        "Status": null,
        "Screenshots": null,
        "Blockers": [{"row_id": "Zy12ab", "display_value": "Setup"}]
    });

    let parsed: Value = task_query_schema().parse(row.clone()).unwrap();
    assert_eq!(parsed, row);
}

#[test]
fn test_empty_image_is_null_in_query_form_and_absent_in_row_form() {
    let query_schema = RowSchema::for_query().column("Pics", query_types::image());
    let row_schema = RowSchema::for_rows().column("Pics", row_types::image());

    assert!(query_schema.validate(&json!({"Pics": null})).is_ok());
    let err = query_schema.validate(&json!({})).unwrap_err();
    assert!(err.has_issue_at("Pics"));

    assert!(row_schema.validate(&json!({"_id": "r1"})).is_ok());
    let err = row_schema
        .validate(&json!({"_id": "r1", "Pics": null}))
        .unwrap_err();
    assert!(err.has_issue_at("Pics"));
}

#[test_case(json!("Open"), true ; "declared option")]
#[test_case(json!("Archived"), false ; "undeclared option")]
#[test_case(json!(1), false ; "wrong type")]
fn test_single_select_options(value: Value, ok: bool) {
    let schema = RowSchema::for_query().column("Status", query_types::single_select(["Open", "Closed"]));
    assert_eq!(schema.validate(&json!({ "Status": value })).is_ok(), ok);
}

#[test]
fn test_multiple_select_rejects_unknown_option() {
    let schema = RowSchema::for_rows().column("Tags", row_types::multiple_select(["a", "b"]));
    let err = schema
        .validate(&json!({"_id": "r1", "Tags": ["a", "z"]}))
        .unwrap_err();
    assert!(err.has_issue_at("Tags[1]"));
}

#[test]
fn test_lazy_selects_accept_any_string() {
    let schema = RowSchema::for_query()
        .column("One", query_types::lazy_single_select())
        .column("Many", query_types::lazy_multiple_select());
    assert!(schema
        .validate(&json!({"One": "whatever", "Many": ["x", "y"]}))
        .is_ok());
}

#[test]
fn test_id_is_required_in_row_form() {
    let err = RowSchema::for_rows().validate(&json!({"Name": "x"})).unwrap_err();
    assert!(err.has_issue_at("_id"));
}

#[test_case(json!({"_id": "r1", "_locked": null}), true ; "locked null")]
#[test_case(json!({"_id": "r1"}), true ; "locked absent")]
#[test_case(json!({"_id": "r1", "_locked": true}), true ; "locked set")]
#[test_case(json!({"_id": "r1", "_locked": "yes"}), false ; "locked wrong type")]
#[test_case(json!({"_id": "r1", "_archived": null}), false ; "archived null")]
fn test_row_form_locked_accepts_null(row: Value, ok: bool) {
    assert_eq!(RowSchema::for_rows().validate(&row).is_ok(), ok);
}

#[test]
fn test_unknown_fields_are_preserved() {
    let row = json!({"_id": "r1", "Name": "n", "Undeclared": {"nested": [1, 2]}});
    let parsed: Row = RowSchema::for_rows()
        .column("Name", row_types::text())
        .parse(row)
        .unwrap();
    assert_eq!(parsed["Undeclared"], json!({"nested": [1, 2]}));
}

#[test]
fn test_geolocation_shape() {
    let schema = RowSchema::for_query().column("Where", query_types::geolocation());
    assert!(schema
        .validate(&json!({"Where": {"lng": 8.5, "lat": 47.3, "country_region": "CH"}}))
        .is_ok());

    let err = schema
        .validate(&json!({"Where": {"lng": 8.5, "country_region": "CH"}}))
        .unwrap_err();
    assert!(err.has_issue_at("Where.lat"));
}

#[test]
fn test_button_is_always_empty() {
    let query = RowSchema::for_query().column("Go", query_types::button());
    assert!(query.validate(&json!({"Go": null})).is_ok());
    assert!(query.validate(&json!({"Go": "clicked"})).is_err());

    let row = RowSchema::for_rows().column("Go", row_types::button());
    assert!(row.validate(&json!({"_id": "r1"})).is_ok());
}

#[test_case(json!("someone@example.com"), true ; "valid email")]
#[test_case(json!("not-an-email"), false ; "missing at sign")]
#[test_case(json!(null), true ; "empty")]
fn test_email_format(value: Value, ok: bool) {
    let schema = RowSchema::for_query().column("Mail", query_types::email());
    assert_eq!(schema.validate(&json!({ "Mail": value })).is_ok(), ok);
}

#[test]
fn test_url_format() {
    let schema = RowSchema::for_rows().column("Site", row_types::url());
    assert!(schema
        .validate(&json!({"_id": "r1", "Site": "https://seatable.io"}))
        .is_ok());
    assert!(schema
        .validate(&json!({"_id": "r1", "Site": "seatable dot io"}))
        .is_err());
}

#[test]
fn test_formula_adopts_form_nullability() {
    let query = query_types::formula(query_types::number());
    assert_eq!(query.presence(), Presence::Nullable);
    assert_eq!(query.kind(), &FieldKind::Number);

    let row = row_types::link_formula(query_types::checkbox());
    assert_eq!(row.presence(), Presence::Optional);
    assert_eq!(row.kind(), &FieldKind::Boolean);
}

#[test]
fn test_link_forms_differ() {
    let query = RowSchema::for_query().column("L", query_types::link());
    let row = RowSchema::for_rows().column("L", row_types::link());

    assert!(query.validate(&json!({"L": ["r2"]})).is_err());
    assert!(row.validate(&json!({"_id": "r1", "L": ["r2"]})).is_ok());
}

#[test]
fn test_column_redeclaration_replaces() {
    let schema = RowSchema::for_rows()
        .column("Name", row_types::text())
        .column("Name", row_types::number());
    assert_eq!(schema.columns().filter(|(n, _)| *n == "Name").count(), 1);
    assert_eq!(schema.get("Name"), Some(&row_types::number()));
}

#[test]
fn test_parse_all_collects_issues_per_row() {
    let schema = RowSchema::for_rows().column("N", row_types::number());
    let rows = vec![
        json!({"_id": "r1", "N": 1}),
        json!({"_id": "r2", "N": "two"}),
        json!({"N": 3}),
    ];

    let err = schema.parse_all::<Value>(rows, "rows").unwrap_err();
    assert_eq!(err.issues().len(), 2);
    assert!(err.has_issue_at("rows[1].N"));
    assert!(err.has_issue_at("rows[2]._id"));
}

#[test]
fn test_parse_into_typed_struct() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Task {
        #[serde(rename = "_id")]
        id: String,
        #[serde(rename = "Name")]
        name: Option<String>,
    }

    let schema = RowSchema::for_rows().column("Name", row_types::text());
    let tasks: Vec<Task> = schema
        .parse_all(vec![json!({"_id": "r1", "Name": "a"}), json!({"_id": "r2"})], "rows")
        .unwrap();

    assert_eq!(
        tasks,
        vec![
            Task {
                id: "r1".to_string(),
                name: Some("a".to_string())
            },
            Task {
                id: "r2".to_string(),
                name: None
            },
        ]
    );
}

#[test]
fn test_non_object_row() {
    let err = RowSchema::for_rows().validate(&json!([1, 2])).unwrap_err();
    assert_eq!(err.to_string(), "expected row object");
}

#[test]
fn test_validation_error_display() {
    let err = ValidationError::new(vec![
        ValidationIssue {
            path: "a".to_string(),
            message: "bad".to_string(),
        },
        ValidationIssue {
            path: "b[0]".to_string(),
            message: "worse".to_string(),
        },
    ]);
    assert_eq!(err.to_string(), "2 issues: a: bad; b[0]: worse");
    assert!(err.clone().with_prefix("rows[4]").has_issue_at("rows[4].b[0]"));
}
