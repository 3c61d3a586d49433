//! Decoding of procedure inputs that are not entity payloads.

use aud_core::validation::{FieldIssue, IssueKind, UpdateShape, ValidationErrors};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Acknowledgement returned by every `delete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteAck {
    pub success: bool,
    pub id: i64,
}

impl DeleteAck {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self { success: true, id }
    }
}

/// `{ "id": <integer> }`
///
/// # Errors
///
/// Reports `id` as missing, null, or not an integer.
pub fn parse_id(input: &Value) -> Result<i64, ValidationErrors> {
    let Value::Object(object) = input else {
        return Err(ValidationErrors::malformed("input", "expected an object with an id"));
    };
    match object.get("id") {
        None => Err(ValidationErrors::single("id", IssueKind::Missing)),
        Some(Value::Null) => Err(ValidationErrors::single("id", IssueKind::Null)),
        Some(value) => value.as_i64().ok_or_else(|| {
            ValidationErrors::single("id", IssueKind::InvalidType { expected: "integer" })
        }),
    }
}

/// `{ "id": <integer>, "data": { ...sparse fields } }`
///
/// # Errors
///
/// Issues from both parts are reported together.
pub fn parse_update<U: UpdateShape>(input: &Value) -> Result<(i64, U), ValidationErrors> {
    let id = parse_id(input);
    let data = match input.get("data") {
        None => Err(ValidationErrors::single("data", IssueKind::Missing)),
        Some(data) => U::parse(data),
    };
    match (id, data) {
        (Ok(id), Ok(data)) => Ok((id, data)),
        (Err(mut a), Err(b)) => {
            a.issues.extend(b.issues);
            Err(a)
        }
        (Err(e), _) | (_, Err(e)) => Err(e),
    }
}

/// List filter; `null` or an absent input means "no filter".
///
/// # Errors
///
/// Reports each filter key whose value does not decode, under that key.
pub fn parse_filter<F: DeserializeOwned + Default>(input: &Value) -> Result<F, ValidationErrors> {
    let object = match input {
        Value::Null => return Ok(F::default()),
        Value::Object(object) => object,
        _ => {
            return Err(ValidationErrors::single(
                "input",
                IssueKind::InvalidType { expected: "object" },
            ));
        }
    };
    serde_json::from_value(input.clone()).map_err(|whole| {
        let mut errors = ValidationErrors::default();
        for (key, value) in object {
            let single = Value::Object(Map::from_iter([(key.clone(), value.clone())]));
            if let Err(e) = serde_json::from_value::<F>(single) {
                errors.issues.push(FieldIssue::new(
                    key.as_str(),
                    IssueKind::Malformed {
                        detail: e.to_string(),
                    },
                ));
            }
        }
        if errors.is_empty() {
            ValidationErrors::malformed("input", whole)
        } else {
            errors
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aud_core::updates::FindingUpdate;
    use aud_db::repos::FindingFilter;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({}), IssueKind::Missing)]
    #[case(json!({"id": null}), IssueKind::Null)]
    #[case(json!({"id": "7"}), IssueKind::InvalidType { expected: "integer" })]
    #[case(json!({"id": 1.5}), IssueKind::InvalidType { expected: "integer" })]
    fn bad_ids(#[case] input: Value, #[case] kind: IssueKind) {
        let err = parse_id(&input).unwrap_err();
        assert_eq!(err.issue_for("id"), Some(&kind));
    }

    #[test]
    fn id_must_be_in_an_object() {
        let err = parse_id(&json!(5)).unwrap_err();
        assert_eq!(err.fields(), vec!["input"]);
        assert_eq!(parse_id(&json!({"id": 5})).unwrap(), 5);
    }

    #[test]
    fn update_reports_id_and_data_issues_together() {
        let err = parse_update::<FindingUpdate>(&json!({"data": {"title": ""}})).unwrap_err();
        assert_eq!(err.fields(), vec!["id", "title"]);
    }

    #[test]
    fn update_requires_data() {
        let err = parse_update::<FindingUpdate>(&json!({"id": 1})).unwrap_err();
        assert_eq!(err.issue_for("data"), Some(&IssueKind::Missing));
    }

    #[test]
    fn update_parses_sparse_data() {
        let (id, update) =
            parse_update::<FindingUpdate>(&json!({"id": 3, "data": {"status": "closed"}})).unwrap();
        assert_eq!(id, 3);
        assert_eq!(update.changes().len(), 1);
    }

    #[test]
    fn null_filter_is_default() {
        let filter: FindingFilter = parse_filter(&Value::Null).unwrap();
        assert_eq!(filter, FindingFilter::default());
    }

    #[test]
    fn bad_filter_values_are_reported_per_field() {
        let err = parse_filter::<FindingFilter>(&json!({
            "auditId": 2,
            "riskLevel": "severe",
            "status": "pending",
            "limit": -1
        }))
        .unwrap_err();
        let mut fields = err.fields();
        fields.sort_unstable();
        assert_eq!(fields, vec!["limit", "riskLevel", "status"]);
        assert!(matches!(
            err.issue_for("riskLevel"),
            Some(IssueKind::Malformed { detail }) if detail.contains("severe")
        ));
    }

    #[test]
    fn filter_must_be_an_object() {
        let err = parse_filter::<FindingFilter>(&json!([1])).unwrap_err();
        assert_eq!(
            err.issue_for("input"),
            Some(&IssueKind::InvalidType { expected: "object" })
        );
    }
}
