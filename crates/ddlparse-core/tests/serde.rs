//! JSON serialization of the syntax tree.

#![cfg(feature = "serde")]

mod common;
use common::*;

use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn index_serializes_with_where_key() {
    let statement = parse_one("CREATE UNIQUE INDEX i ON t(a) WHERE a > 1");
    let value = serde_json::to_value(&statement).unwrap();
    assert_eq!(
        value,
        json!({
            "create_index": {
                "name": { "identifier": { "value": "i" } },
                "table": "t",
                "columns": ["a"],
                "if_not_exists": false,
                "unique": true,
                "where": {
                    "infix": {
                        "left": { "identifier": { "value": "a" } },
                        "op": "gt",
                        "right": { "literal": { "integer": 1 } }
                    }
                }
            }
        })
    );
}

#[test]
fn foreign_key_serializes_match_mode_as_match() {
    let table = parse_table("CREATE TABLE t(a INTEGER REFERENCES o MATCH FULL)");
    let value = serde_json::to_value(&table).unwrap();
    let fk = &value["columns"][0]["definition"]["constraints"][0]["foreign_key"];
    assert_eq!(fk["foreign_table"], json!("o"));
    assert_eq!(fk["match"], json!("full"));
    assert_eq!(fk["on_delete"], json!(null));
}

#[test]
fn default_keyword_serializes_in_snake_case() {
    let table = parse_table("CREATE TABLE t(c DATETIME DEFAULT CURRENT_TIMESTAMP)");
    let value = serde_json::to_value(&table).unwrap();
    assert_eq!(
        value["columns"][0]["definition"]["default"],
        json!({ "keyword": "current_timestamp" })
    );
}
