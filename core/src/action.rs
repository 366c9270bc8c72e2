//! Action model for the uniflow store.
//!
//! An [`Action`] is a transient record describing a requested state
//! transition. It carries a `kind` tag (the wire-level `type` field), an
//! optional routing `target` naming the slice reducer that should handle it,
//! and an optional JSON `payload`.
//!
//! Two boundaries produce actions:
//!
//! - typed callers use the builder surface ([`Action::new`],
//!   [`Action::with_target`], [`Action::with_payload`])
//! - dynamic callers hand a raw [`serde_json::Value`] to
//!   [`Action::from_value`], which enforces the three shape rules and maps
//!   violations to the named [`ActionError`] kinds
//!
//! Routing never mutates an action: forwarding to a slice goes through
//! [`Action::untargeted`], which builds a copy with the target cleared, so a
//! caller-supplied action is never observed changing under its feet.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Reserved action kind dispatched once at store construction.
///
/// Init actions bypass the target requirement and are broadcast to every
/// slice reducer.
pub const INIT_KIND: &str = "@INIT";

/// Reserved target that broadcasts an action to every slice reducer.
pub const WILDCARD_TARGET: &str = "*";

/// Shape violations raised when validating a raw action record.
///
/// These are the only named error kinds in the system; they are always
/// recoverable by the caller fixing the action and dispatching again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The dispatched value was not a JSON object.
    #[error("action should be a record but got {kind}")]
    NotARecord {
        /// Kind name of the offending value (`"null"`, `"array"`, ...).
        kind: &'static str,
    },

    /// The record carries no usable string `type` field.
    #[error("action should have a type")]
    MissingKind,

    /// A non-init action carries no string `target` field.
    #[error("action should have a target")]
    MissingTarget,
}

/// A record describing a requested state transition.
///
/// Actions are plain values: created by callers, consumed by one dispatch,
/// never retained by the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
}

impl Action {
    /// Creates an action with the given kind and no target or payload.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            target: None,
            payload: None,
        }
    }

    /// Creates the reserved initialization action.
    #[must_use]
    pub fn init() -> Self {
        Self::new(INIT_KIND)
    }

    /// Sets the routing target.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Sets the payload.
    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Validates a raw JSON value as an action record.
    ///
    /// Enforces, in order: the value is an object, it carries a string
    /// `type`, and — unless the type is [`INIT_KIND`] — it carries a string
    /// `target`. Fields beyond `type`/`target`/`payload` are dropped.
    ///
    /// # Errors
    ///
    /// Returns the matching [`ActionError`] kind for each shape violation.
    pub fn from_value(value: Value) -> Result<Self, ActionError> {
        let record = match value {
            Value::Object(record) => record,
            other => {
                return Err(ActionError::NotARecord {
                    kind: value_kind(&other),
                });
            }
        };

        let kind = record
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ActionError::MissingKind)?
            .to_owned();

        let target = record
            .get("target")
            .and_then(Value::as_str)
            .map(str::to_owned);

        if kind != INIT_KIND && target.is_none() {
            return Err(ActionError::MissingTarget);
        }

        let payload = record.get("payload").cloned();

        Ok(Self {
            kind,
            target,
            payload,
        })
    }

    /// The action's kind tag (the wire-level `type`).
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The routing target, if any.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// The payload, if any.
    #[must_use]
    pub const fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Whether this is the reserved initialization action.
    #[must_use]
    pub fn is_init(&self) -> bool {
        self.kind == INIT_KIND
    }

    /// Whether this action is forwarded to every slice: either an init
    /// action or a wildcard-targeted one.
    #[must_use]
    pub fn is_broadcast(&self) -> bool {
        self.is_init() || self.target.as_deref() == Some(WILDCARD_TARGET)
    }

    /// A copy of this action with the target cleared, as forwarded to slice
    /// reducers. The original action is left untouched.
    #[must_use]
    pub fn untargeted(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            target: None,
            payload: self.payload.clone(),
        }
    }
}

/// Kind name of a JSON value, for shape-violation diagnostics.
pub(crate) const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn from_value_accepts_full_record() {
        let action = Action::from_value(json!({
            "type": "ADD",
            "target": "toDo",
            "payload": {"text": "x"},
        }))
        .unwrap();

        assert_eq!(action.kind(), "ADD");
        assert_eq!(action.target(), Some("toDo"));
        assert_eq!(action.payload(), Some(&json!({"text": "x"})));
    }

    #[test]
    fn from_value_rejects_non_records() {
        for (value, kind) in [
            (json!(null), "null"),
            (json!(true), "boolean"),
            (json!(42), "number"),
            (json!("ADD"), "string"),
            (json!([1, 2]), "array"),
        ] {
            assert_eq!(
                Action::from_value(value),
                Err(ActionError::NotARecord { kind })
            );
        }
    }

    #[test]
    fn from_value_rejects_missing_kind_regardless_of_other_fields() {
        let result = Action::from_value(json!({"target": "toDo", "payload": 1}));
        assert_eq!(result, Err(ActionError::MissingKind));

        let result = Action::from_value(json!({"type": 7, "target": "toDo"}));
        assert_eq!(result, Err(ActionError::MissingKind));
    }

    #[test]
    fn from_value_requires_target_for_non_init_kinds() {
        let result = Action::from_value(json!({"type": "ADD"}));
        assert_eq!(result, Err(ActionError::MissingTarget));

        // Present but unusable for routing counts as missing.
        let result = Action::from_value(json!({"type": "ADD", "target": 7}));
        assert_eq!(result, Err(ActionError::MissingTarget));
    }

    #[test]
    fn from_value_lets_init_skip_the_target() {
        let action = Action::from_value(json!({"type": INIT_KIND})).unwrap();
        assert!(action.is_init());
        assert!(action.is_broadcast());
        assert_eq!(action.target(), None);
    }

    #[test]
    fn wildcard_target_is_a_broadcast() {
        let action = Action::new("ANYTHING").with_target(WILDCARD_TARGET);
        assert!(action.is_broadcast());
        assert!(!action.is_init());
    }

    #[test]
    fn untargeted_copies_leave_the_original_alone() {
        let action = Action::new("ADD")
            .with_target("toDo")
            .with_payload(json!({"text": "x"}));

        let forwarded = action.untargeted();
        assert_eq!(forwarded.target(), None);
        assert_eq!(forwarded.kind(), "ADD");
        assert_eq!(forwarded.payload(), action.payload());
        // Caller's action still carries its target.
        assert_eq!(action.target(), Some("toDo"));
    }

    #[test]
    fn serializes_with_the_wire_field_names() {
        let action = Action::new("ADD").with_target("toDo");
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value, json!({"type": "ADD", "target": "toDo"}));
    }

    proptest! {
        #[test]
        fn any_record_with_type_and_target_parses(
            kind in "[A-Z]{1,12}",
            target in "[a-z]{1,12}",
        ) {
            let action = Action::from_value(json!({
                "type": kind,
                "target": target,
            }))
            .unwrap();
            prop_assert_eq!(action.kind(), kind.as_str());
            prop_assert_eq!(action.target(), Some(target.as_str()));
        }

        #[test]
        fn non_object_values_never_parse(value in prop_oneof![
            Just(json!(null)),
            any::<bool>().prop_map(|b| json!(b)),
            any::<i64>().prop_map(|n| json!(n)),
            ".*".prop_map(|s| json!(s)),
        ]) {
            let is_not_a_record = matches!(
                Action::from_value(value),
                Err(ActionError::NotARecord { .. })
            );
            prop_assert!(is_not_a_record);
        }
    }
}
