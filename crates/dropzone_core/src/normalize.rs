//! Response normalizer: classify an arbitrary JSON payload into one of a closed
//! set of shapes, then turn that shape into render blocks.
//!
//! Classification is structural only. A payload is matched against, in order:
//!
//! 1. an object mapping group labels to non-empty record lists,
//! 2. a non-empty array of records,
//! 3. an object carrying the named fields `subject`, `groups` and/or `rows`,
//!
//! and anything else is unrecognized. An object is read as shape 3 only when
//! no key outside the named fields holds a record list; otherwise every
//! record-list key, named or not, becomes a heading and a table.
use serde_json::{Map, Value};

use crate::blocks::{ListSection, RenderBlock, TableDescriptor};

/// Title used for a top-level array of records.
pub const DEFAULT_TABLE_TITLE: &str = "Patchlist";
pub const UNEXPECTED_FORMAT_MESSAGE: &str = "Unexpected data format.";

pub const SUBJECT_FIELD: &str = "subject";
pub const GROUPS_FIELD: &str = "groups";
pub const ROWS_FIELD: &str = "rows";

const NAMED_FIELDS: [&str; 3] = [SUBJECT_FIELD, GROUPS_FIELD, ROWS_FIELD];

const GROUPS_TITLE: &str = "Groups";
const ROWS_TITLE: &str = "Rows";
const GROUP_LABEL_FIELD: &str = "label";
const GROUP_ITEMS_FIELD: &str = "items";

/// The recognized payload layouts. Borrowed from the payload; cheap to build.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadShape<'a> {
    /// Label -> record list, in payload key order. Never empty.
    GroupedRecords(Vec<(&'a str, &'a [Value])>),
    /// Top-level record list. Never empty.
    RecordList(&'a [Value]),
    /// At least one named field is present and usable.
    NamedFields(NamedFields<'a>),
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamedFields<'a> {
    pub subject: Option<&'a str>,
    pub groups: Vec<ItemGroup<'a>>,
    pub rows: Option<&'a [Value]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemGroup<'a> {
    pub label: &'a str,
    pub items: &'a [Value],
}

impl<'a> NamedFields<'a> {
    fn extract(fields: &'a Map<String, Value>) -> Self {
        let subject = fields.get(SUBJECT_FIELD).and_then(Value::as_str);
        let groups = fields
            .get(GROUPS_FIELD)
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(item_group).collect())
            .unwrap_or_default();
        let rows = fields
            .get(ROWS_FIELD)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .filter(|records| is_record_list(records));

        Self {
            subject,
            groups,
            rows,
        }
    }

    fn is_empty(&self) -> bool {
        self.subject.is_none() && self.groups.is_empty() && self.rows.is_none()
    }
}

fn item_group(entry: &Value) -> Option<ItemGroup<'_>> {
    let fields = entry.as_object()?;
    let label = fields.get(GROUP_LABEL_FIELD)?.as_str()?;
    let items = fields.get(GROUP_ITEMS_FIELD)?.as_array()?;
    Some(ItemGroup { label, items })
}

/// A non-empty list whose first element is an object.
fn is_record_list(values: &[Value]) -> bool {
    values.first().is_some_and(Value::is_object)
}

/// Determines the shape of a payload. Total and deterministic.
pub fn classify(payload: &Value) -> PayloadShape<'_> {
    match payload {
        Value::Object(fields) => {
            let groups = record_groups(fields);
            let has_unnamed_group = groups
                .iter()
                .any(|(label, _)| !NAMED_FIELDS.contains(label));
            if has_unnamed_group {
                return PayloadShape::GroupedRecords(groups);
            }
            let named = NamedFields::extract(fields);
            if !named.is_empty() {
                PayloadShape::NamedFields(named)
            } else if !groups.is_empty() {
                PayloadShape::GroupedRecords(groups)
            } else {
                PayloadShape::Unrecognized
            }
        }
        Value::Array(records) if is_record_list(records) => PayloadShape::RecordList(records),
        _ => PayloadShape::Unrecognized,
    }
}

/// Keys holding record lists, in payload order.
fn record_groups(fields: &Map<String, Value>) -> Vec<(&str, &[Value])> {
    fields
        .iter()
        .filter_map(|(label, value)| {
            value
                .as_array()
                .map(Vec::as_slice)
                .filter(|records| is_record_list(records))
                .map(|records| (label.as_str(), records))
        })
        .collect()
}

/// Converts a payload into an ordered block sequence.
pub fn normalize(payload: &Value) -> Vec<RenderBlock> {
    match classify(payload) {
        PayloadShape::GroupedRecords(groups) => groups
            .into_iter()
            .filter_map(|(label, records)| {
                TableDescriptor::from_records(label, records).map(|table| {
                    [RenderBlock::heading(label), RenderBlock::Table(table)]
                })
            })
            .flatten()
            .collect(),
        PayloadShape::RecordList(records) => {
            TableDescriptor::from_records(DEFAULT_TABLE_TITLE, records)
                .map(RenderBlock::Table)
                .into_iter()
                .collect()
        }
        PayloadShape::NamedFields(named) => named_field_blocks(named),
        PayloadShape::Unrecognized => vec![RenderBlock::warning(UNEXPECTED_FORMAT_MESSAGE)],
    }
}

fn named_field_blocks(named: NamedFields<'_>) -> Vec<RenderBlock> {
    let mut blocks = Vec::with_capacity(3);
    if let Some(subject) = named.subject {
        blocks.push(RenderBlock::heading(subject));
    }
    if !named.groups.is_empty() {
        let sections = named
            .groups
            .iter()
            .map(|group| ListSection {
                label: group.label.to_string(),
                items: group.items.iter().map(item_text).collect(),
            })
            .collect();
        blocks.push(RenderBlock::ListGroup {
            title: GROUPS_TITLE.to_string(),
            sections,
        });
    }
    if let Some(table) = named
        .rows
        .and_then(|records| TableDescriptor::from_records(ROWS_TITLE, records))
    {
        blocks.push(RenderBlock::Table(table));
    }
    blocks
}

fn item_text(item: &Value) -> String {
    match item {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_grouped_records_in_key_order() {
        let payload = json!({"b": [{"x": 1}], "skip": [], "a": [{"y": 2}], "n": 3});
        let PayloadShape::GroupedRecords(groups) = classify(&payload) else {
            panic!("expected grouped records");
        };
        let labels: Vec<_> = groups.iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["b", "a"]);
    }

    #[test]
    fn scalar_lists_are_not_record_groups() {
        assert_eq!(classify(&json!({"a": [1, 2, 3]})), PayloadShape::Unrecognized);
        assert_eq!(classify(&json!(["p", "q"])), PayloadShape::Unrecognized);
    }

    #[test]
    fn named_fields_alone_are_named_fields() {
        let payload = json!({"subject": "Invoice", "rows": [{"k": 1}], "total": 3});
        let PayloadShape::NamedFields(named) = classify(&payload) else {
            panic!("expected named fields");
        };
        assert_eq!(named.subject, Some("Invoice"));
        assert!(named.groups.is_empty());
        assert_eq!(named.rows.map(<[Value]>::len), Some(1));
    }

    #[test]
    fn unnamed_record_list_makes_whole_object_grouped() {
        let payload = json!({"subject": "Invoice", "rows": [{"k": 1}], "Extra": [{"k": 2}]});
        let PayloadShape::GroupedRecords(groups) = classify(&payload) else {
            panic!("expected grouped records");
        };
        let labels: Vec<_> = groups.iter().map(|(label, _)| *label).collect();
        assert_eq!(labels, vec!["rows", "Extra"]);
    }

    #[test]
    fn malformed_named_groups_still_render_as_records() {
        let payload = json!({"groups": [{"name": "no label or items"}]});
        assert!(matches!(classify(&payload), PayloadShape::GroupedRecords(_)));
    }

    #[test]
    fn unusable_named_fields_fall_through() {
        let payload = json!({"subject": 7, "groups": "nope", "Data": [{"k": 1}]});
        assert!(matches!(classify(&payload), PayloadShape::GroupedRecords(_)));
    }

    #[test]
    fn scalars_and_empties_are_unrecognized() {
        for payload in [json!(null), json!(true), json!(1.5), json!("text"), json!({}), json!([])] {
            assert_eq!(classify(&payload), PayloadShape::Unrecognized, "{payload}");
        }
    }

    #[test]
    fn group_items_are_stringified() {
        let payload = json!({"groups": [
            {"label": "Parts", "items": ["bolt", 4, null]},
            {"items": ["no label"]}
        ]});
        let blocks = normalize(&payload);
        assert_eq!(
            blocks,
            vec![RenderBlock::ListGroup {
                title: "Groups".to_string(),
                sections: vec![ListSection {
                    label: "Parts".to_string(),
                    items: vec!["bolt".to_string(), "4".to_string(), "null".to_string()],
                }],
            }]
        );
    }
}
