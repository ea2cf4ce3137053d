//! Integration tests for productive-table.

use std::sync::Arc;

use arrow::{
    array::{Int64Array, RecordBatch, StringArray},
    datatypes::{DataType, Field, Schema},
};
use productive_table::{
    render::{to_html, to_text},
    ArrowPayload, CellRole, Component, ComponentValue, DisplayOptions, Error, HostConfig,
    IndexVisibility, MissingValuePolicy, RecordingHost, RenderPolicy, Rendered, ReportTrigger,
    StylerPayload, TableAdapter, TablePayload,
};

fn data_batch() -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("foo", DataType::Int64, false),
        Field::new("bar", DataType::Utf8, true),
    ]));
    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(vec![1, 2, 3])),
            Arc::new(StringArray::from(vec![Some("hey"), None, Some("up")])),
        ],
    )
    .unwrap()
}

fn index_batch() -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![Field::new("", DataType::Int64, false)]));
    RecordBatch::try_new(schema, vec![Arc::new(Int64Array::from(vec![0, 1, 2]))]).unwrap()
}

/// Two header levels over the two data columns.
fn header_batch() -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new("0", DataType::Utf8, false),
        Field::new("1", DataType::Utf8, false),
    ]));
    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(vec!["group", "foo"])),
            Arc::new(StringArray::from(vec!["group", "bar"])),
        ],
    )
    .unwrap()
}

/// 2 header rows, 3 data rows, 3 columns including the index column.
fn two_level_payload() -> TablePayload {
    TablePayload::Arrow(
        ArrowPayload::from_batch(&data_batch())
            .unwrap()
            .with_index(&index_batch())
            .unwrap()
            .with_columns(&header_batch())
            .unwrap(),
    )
}

#[test]
fn test_two_level_table_with_index() {
    let table = two_level_payload().decode().unwrap();
    let adapter = TableAdapter::default();

    let header = adapter.decode_rows(table.as_ref(), true, true).unwrap();
    let body = adapter.decode_rows(table.as_ref(), false, true).unwrap();
    assert_eq!(header.len(), 2);
    assert!(header.iter().all(|r| r.len() == 3));
    assert_eq!(body.len(), 3);
    assert!(body.iter().all(|r| r.len() == 3));

    let role = |row, col| adapter.decode_cell(table.as_ref(), row, col).unwrap().role;
    assert_eq!(role(0, 0), CellRole::Blank);
    assert_eq!(role(2, 0), CellRole::Index);
    assert_eq!(role(0, 1), CellRole::ColumnHeader);
    assert_eq!(role(2, 1), CellRole::Data);
}

#[test]
fn test_two_level_table_skipping_first_column() {
    let table = two_level_payload().decode().unwrap();
    let adapter = TableAdapter::default();
    let options = DisplayOptions::new().with_skip_first_col(true);

    let decoded = adapter.decode(table.as_ref(), &options).unwrap();
    for row in decoded.header.iter().chain(&decoded.body) {
        assert_eq!(row.len(), 2);
        assert!(row.cells.iter().all(|c| !c.role.is_index_column()));
    }
    assert_eq!(
        decoded.body[0].texts().collect::<Vec<_>>(),
        vec!["1", "hey"]
    );
}

#[test]
fn test_missing_value_per_policy() {
    let table = two_level_payload().decode().unwrap();

    let marker = TableAdapter::default();
    assert_eq!(marker.decode_cell(table.as_ref(), 3, 2).unwrap().text, "N/A");

    let empty = TableAdapter::new(
        RenderPolicy::default().with_missing_value(MissingValuePolicy::Empty),
    );
    assert_eq!(empty.decode_cell(table.as_ref(), 3, 2).unwrap().text, "");
    assert_eq!(empty.decode_cell(table.as_ref(), 0, 0).unwrap().text, "");
}

#[test]
fn test_omit_index_visibility() {
    let table = two_level_payload().decode().unwrap();
    let adapter = TableAdapter::new(
        RenderPolicy::default().with_index_visibility(IndexVisibility::Omit),
    );
    let decoded = adapter.decode(table.as_ref(), &DisplayOptions::new()).unwrap();
    assert!(decoded.header.iter().all(|r| r.len() == 2));
    assert_eq!(decoded.column_span, 2);
}

#[test]
fn test_html_from_arrow_payload() {
    let payload = ArrowPayload::from_batch(&data_batch())
        .unwrap()
        .with_index(&index_batch())
        .unwrap()
        .with_styler(StylerPayload {
            uuid: "x1".to_string(),
            caption: Some("Numbers".to_string()),
            styles: Some("#T_x1row0_col0 { color: red; }".to_string()),
            display_values: None,
        });
    let config = HostConfig::new(TablePayload::Arrow(payload));
    let table = config.data.decode().unwrap();
    let decoded = TableAdapter::default()
        .decode(table.as_ref(), &config.options)
        .unwrap();

    let html = to_html(&decoded);
    assert!(html.contains("<table id=\"T_x1\">"));
    assert!(html.contains("<caption>Numbers</caption>"));
    assert!(html.contains("<th id=\"T_x1level0_col0\" class=\"col_heading level0 col0\">foo</th>"));
    assert!(html.contains("<td id=\"T_x1row0_col1\" class=\"data row0 col1\">hey</td>"));
    assert!(html.contains("<th class=\"blank\"></th>"));
}

#[test]
fn test_zero_row_table_renders_placeholder() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("a", DataType::Int64, false),
        Field::new("b", DataType::Int64, false),
    ]));
    let batch = RecordBatch::new_empty(schema);
    let config = HostConfig::new(TablePayload::Arrow(ArrowPayload::from_batch(&batch).unwrap()));
    let table = config.data.decode().unwrap();
    let decoded = TableAdapter::default()
        .decode(table.as_ref(), &config.options)
        .unwrap();

    assert!(decoded.is_empty());
    let html = to_html(&decoded);
    assert!(html.contains("<td colspan=\"2\" class=\"empty\">empty</td>"));
    assert_eq!(to_text(&decoded, 80).last().map(String::as_str), Some("(empty)"));
}

#[test]
fn test_grid_model_from_arrow_payload() {
    let config = HostConfig::new(TablePayload::Arrow(
        ArrowPayload::from_batch(&data_batch())
            .unwrap()
            .with_index(&index_batch())
            .unwrap(),
    ))
    .with_options(DisplayOptions::new().with_show_index(false));
    let table = config.data.decode().unwrap();
    let model = TableAdapter::default()
        .build_grid_model(table.as_ref(), &config.options)
        .unwrap();

    assert_eq!(
        model.to_json().unwrap(),
        r#"{"columns":[{"name":"foo"},{"name":"bar"}],"rows":[{"foo":"1","bar":"hey"},{"foo":"2","bar":"N/A"},{"foo":"3","bar":"up"}]}"#
    );
}

#[test]
fn test_corrupted_tag_fails_render() {
    let config = HostConfig::from_json(
        r#"{"data": {"format": "grid", "header_rows": 1, "cells": [
            [{"type": "columns", "content": "a"}],
            [{"type": "colums", "content": "1"}]
        ]}}"#,
    )
    .unwrap();

    let mut component = Component::new(RenderPolicy::default(), RecordingHost::new());
    match component.render(config) {
        Rendered::Failed(Error::Decode { row, col, tag }) => {
            assert_eq!((row, col), (1, 0));
            assert_eq!(tag, "colums");
        }
        other => panic!("expected decode failure, got {other:?}"),
    }
}

#[test]
fn test_component_reports_unmodified_table_on_mount() {
    let payload = two_level_payload();
    let mut component = Component::new(
        RenderPolicy::default().with_report(ReportTrigger::OnMount),
        RecordingHost::new(),
    );
    assert!(component.render(HostConfig::new(payload.clone())).table().is_some());
    component.mount().unwrap();
    assert_eq!(
        component.host().reported_values(),
        vec![&ComponentValue::Table(payload)]
    );
}

#[test]
fn test_decoding_is_idempotent() {
    let table = two_level_payload().decode().unwrap();
    let adapter = TableAdapter::default();
    let options = DisplayOptions::new();
    let first = adapter.decode(table.as_ref(), &options).unwrap();
    let second = adapter.decode(table.as_ref(), &options).unwrap();
    assert_eq!(first, second);
}
