use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "knowledge_base": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "entries_dir": { "type": "string", "minLength": 1 },
                    "catalog_path": { "type": "string", "minLength": 1 }
                }
            },
            "resolver": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "timeout_secs": { "type": "integer", "minimum": 1 },
                    "concurrency": { "type": "integer", "minimum": 1 }
                }
            }
        }
    })
});
