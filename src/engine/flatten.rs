// Copyright (c) 2025 Tabular
// SPDX-License-Identifier: BUSL-1.1
//! Flatten the engine's region sequence into the API's table payload

use serde_json::Value;
use tracing::warn;

use super::Region;

/// Extract the first detected table from an engine result.
///
/// Table regions without a recognition payload are skipped. For each
/// candidate the HTML rendering is preferred, then a generic `table`
/// field, then the raw payload as-is. Regions after the first match are
/// discarded.
pub fn first_table(regions: &[Region]) -> Option<Value> {
    let mut tables = regions
        .iter()
        .filter(|r| r.kind == "table")
        .filter_map(|r| r.res.as_ref())
        .map(table_payload);

    let first = tables.next()?;

    let discarded = tables.count();
    if discarded > 0 {
        warn!(
            "discarding {} additional table region(s); only the first is returned",
            discarded
        );
    }

    Some(first)
}

fn table_payload(res: &Value) -> Value {
    match res {
        Value::Object(map) => {
            if let Some(html) = map.get("html") {
                html.clone()
            } else if let Some(table) = map.get("table") {
                table.clone()
            } else {
                res.clone()
            }
        }
        other => other.clone(),
    }
}
