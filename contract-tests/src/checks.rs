//! Assertion helpers that fail with [`ContractError::Assertion`] instead of
//! panicking, so a failing check still runs scoped cleanup and is reported
//! with the scenario name.

use harness_core::http::ApiResponse;
use harness_core::schema::{id_text, record_id};
use harness_core::ContractError;
use serde_json::Value;

pub fn expect_status(
    scenario: &str,
    response: &ApiResponse,
    expected: u16,
) -> Result<(), ContractError> {
    if response.status == expected {
        return Ok(());
    }
    Err(ContractError::assertion(
        scenario,
        format!("status of {} {}", response.method, response.url),
        expected,
        format!("{} with body {}", response.status, truncate(&response.body)),
    ))
}

pub fn expect_status_in(
    scenario: &str,
    response: &ApiResponse,
    allowed: &[u16],
) -> Result<(), ContractError> {
    if allowed.contains(&response.status) {
        return Ok(());
    }
    Err(ContractError::assertion(
        scenario,
        format!("status of {} {}", response.method, response.url),
        format!("one of {:?}", allowed),
        response.status,
    ))
}

pub fn expect_array<'a>(scenario: &str, body: &'a Value) -> Result<&'a Vec<Value>, ContractError> {
    body.as_array().ok_or_else(|| {
        ContractError::assertion(scenario, "body is a JSON array", "array", json_kind(body))
    })
}

/// The record's server-assigned id, which must be present and non-empty.
pub fn expect_id(scenario: &str, record: &Value) -> Result<String, ContractError> {
    record_id(record).ok_or_else(|| {
        ContractError::assertion(
            scenario,
            "record carries a non-empty id",
            "non-empty id",
            record.get("id").cloned().unwrap_or(Value::Null),
        )
    })
}

pub fn expect_fields_present(
    scenario: &str,
    record: &Value,
    fields: &[&str],
) -> Result<(), ContractError> {
    for field in fields {
        if record.get(*field).is_none() {
            return Err(ContractError::assertion(
                scenario,
                format!("record has field '{}'", field),
                "present",
                truncate(&record.to_string()),
            ));
        }
    }
    Ok(())
}

/// Every key of the `expected` object must appear in `record` with an equal value.
pub fn expect_subset(
    scenario: &str,
    record: &Value,
    expected: &Value,
) -> Result<(), ContractError> {
    let Some(expected) = expected.as_object() else {
        return Ok(());
    };

    for (key, value) in expected {
        let actual = record.get(key).unwrap_or(&Value::Null);
        if actual != value {
            return Err(ContractError::assertion(
                scenario,
                format!("field '{}'", key),
                value,
                actual,
            ));
        }
    }
    Ok(())
}

/// Compare a reference field against an id, tolerating string/number
/// differences in how the backend renders ids.
pub fn expect_reference(
    scenario: &str,
    record: &Value,
    field: &str,
    id: &str,
) -> Result<(), ContractError> {
    let actual = record.get(field).and_then(id_text);
    if actual.as_deref() == Some(id) {
        return Ok(());
    }
    Err(ContractError::assertion(
        scenario,
        format!("reference field '{}'", field),
        id,
        actual.unwrap_or_else(|| "nothing".to_string()),
    ))
}

/// Fields of `before` that were not patched must be unchanged in `after`.
pub fn expect_untouched(
    scenario: &str,
    before: &Value,
    after: &Value,
    patched: &[String],
) -> Result<(), ContractError> {
    let Some(before) = before.as_object() else {
        return Err(ContractError::assertion(
            scenario,
            "record is a JSON object",
            "object",
            json_kind(before),
        ));
    };

    for (key, value) in before {
        if patched.iter().any(|p| p == key) {
            continue;
        }
        let actual = after.get(key).unwrap_or(&Value::Null);
        if actual != value {
            return Err(ContractError::assertion(
                scenario,
                format!("unpatched field '{}' is unchanged", key),
                value,
                actual,
            ));
        }
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn truncate(text: &str) -> String {
    const MAX: usize = 200;
    match text.char_indices().nth(MAX) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}
