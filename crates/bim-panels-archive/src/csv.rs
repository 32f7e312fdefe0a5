// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property CSV export

use crate::ExportFile;
use bim_panels_model::{FragmentsExporter, FragmentsGroup, PropertiesTable};
use serde_json::Value;

pub const CSV_HEADER: &str = "UUID,Property Set,Property Name,Property Value";

/// Flatten a group's properties into CSV text
///
/// One row per (fragment, property set, property name). A property set is
/// any object-valued attribute of a record. Fields are written as-is, with
/// no quoting.
pub fn properties_csv(group: &FragmentsGroup, properties: &PropertiesTable) -> String {
    let mut rows = vec![CSV_HEADER.to_string()];

    for item in &group.items {
        for id in &item.ids {
            let Some(record) = properties.get(*id) else {
                continue;
            };
            for (set_name, set) in record.property_sets() {
                for (prop_name, value) in set {
                    rows.push(format!(
                        "{},{},{},{}",
                        item.uuid,
                        set_name,
                        prop_name,
                        csv_value(value)
                    ));
                }
            }
        }
    }

    log::debug!("CSV for {}: {} rows", group.name, rows.len() - 1);
    rows.join("\n")
}

/// CSV of the first loaded group's own properties
///
/// Warns and yields nothing when no group is loaded or it carries no
/// `properties.json`. An empty table still exports the header row.
pub fn export_csv(exporter: &dyn FragmentsExporter) -> Option<ExportFile> {
    let Some(group) = exporter.first_group() else {
        log::warn!("No groups found in fragments.");
        return None;
    };
    let Some(properties) = group.local_properties() else {
        log::warn!("No properties found in propsTable.");
        return None;
    };

    let csv = properties_csv(&group, properties);
    log::info!("Exported properties of {} to CSV", group.name);
    Some(ExportFile::new("properties.csv", "text/csv", csv.into_bytes()))
}

fn csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bim_panels_model::{ExpressId, FragmentItem, Result};
    use std::sync::Arc;

    const PROPS: &str = r#"{
        "10": {
            "expressID": 10,
            "type": "IFCWALL",
            "Name": {"type": 1, "value": "Wall A"},
            "Tag": {"type": 1, "value": null}
        },
        "11": {
            "expressID": 11,
            "type": "IFCDOOR",
            "OverallHeight": {"type": 4, "value": 2.1}
        }
    }"#;

    struct OneGroup(Option<Arc<FragmentsGroup>>);

    impl FragmentsExporter for OneGroup {
        fn first_group(&self) -> Option<Arc<FragmentsGroup>> {
            self.0.clone()
        }

        fn export(&self, _group: &FragmentsGroup) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    fn group(properties: Option<PropertiesTable>) -> FragmentsGroup {
        FragmentsGroup::new(
            "g",
            "Model",
            vec![
                FragmentItem::new("frag-a", [ExpressId(10), ExpressId(99)]),
                FragmentItem::new("frag-b", [ExpressId(11)]),
            ],
            Vec::new(),
        )
        .with_properties(properties)
    }

    #[test]
    fn test_one_row_per_triple_header_first() {
        let table = PropertiesTable::from_json(PROPS).unwrap();
        let csv = properties_csv(&group(None), &table);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], CSV_HEADER);
        // Name(type, value) + Tag(type, value) + OverallHeight(type, value)
        assert_eq!(lines.len(), 1 + 6);
        assert!(lines.contains(&"frag-a,Name,value,Wall A"));
        assert!(lines.contains(&"frag-a,Tag,value,"));
        assert!(lines.contains(&"frag-b,OverallHeight,value,2.1"));
        assert!(!csv.contains("expressID"));
    }

    #[test]
    fn test_ids_without_records_emit_nothing() {
        let csv = properties_csv(&group(None), &PropertiesTable::new());
        assert_eq!(csv, CSV_HEADER);
    }

    #[test]
    fn test_export_without_properties_is_none() {
        assert!(export_csv(&OneGroup(Some(Arc::new(group(None))))).is_none());
    }

    #[test]
    fn test_export_empty_properties_is_header_only() {
        let empty = Some(PropertiesTable::new());
        let file = export_csv(&OneGroup(Some(Arc::new(group(empty))))).unwrap();
        assert_eq!(file.bytes, CSV_HEADER.as_bytes());
    }

    #[test]
    fn test_export_without_groups_is_none() {
        assert!(export_csv(&OneGroup(None)).is_none());
    }

    #[test]
    fn test_export_file() {
        let table = PropertiesTable::from_json(PROPS).ok();
        let file = export_csv(&OneGroup(Some(Arc::new(group(table))))).unwrap();
        assert_eq!(file.name, "properties.csv");
        assert_eq!(file.mime, "text/csv");
        assert!(file.bytes.starts_with(CSV_HEADER.as_bytes()));
    }

    #[test]
    fn test_nested_values_as_json() {
        assert_eq!(csv_value(&serde_json::json!([1, 2])), "[1,2]");
        assert_eq!(csv_value(&serde_json::json!(true)), "true");
    }
}
