use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

pub const SCHEMA_VERSION: &str = "wishlist.v1";

/// Pass bookkeeping attached to aggregate results.
#[derive(Debug, Clone, Serialize, Default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
}

/// One document on stdout per command. `apply` is false for plans.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub schema_version: &'static str,
    pub time: DateTime<Utc>,
    pub request_id: Uuid,
    pub op: &'static str,
    pub apply: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Envelope {
    pub fn plan<T: Serialize>(op: &'static str, plan: &T, meta: Option<Meta>) -> Result<Self, serde_json::Error> {
        let mut env = Self::stamped(op, false, meta);
        env.plan = Some(serde_json::to_value(plan)?);
        Ok(env)
    }

    pub fn result<T: Serialize>(op: &'static str, result: &T, meta: Option<Meta>) -> Result<Self, serde_json::Error> {
        let mut env = Self::stamped(op, true, meta);
        env.result = Some(serde_json::to_value(result)?);
        Ok(env)
    }

    fn stamped(op: &'static str, apply: bool, meta: Option<Meta>) -> Self {
        Envelope {
            schema_version: SCHEMA_VERSION,
            time: Utc::now(),
            request_id: Uuid::new_v4(),
            op,
            apply,
            plan: None,
            result: None,
            meta,
        }
    }

    pub fn body(&self) -> Option<&Value> {
        if self.apply { self.result.as_ref() } else { self.plan.as_ref() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plan_envelope_marks_apply_false() {
        let plan = json!({"action": "add", "wishlist_id": 2});
        let env = Envelope::plan("product", &plan, None).expect("to serialize plan");
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["schema_version"], SCHEMA_VERSION);
        assert_eq!(v["op"], "product");
        assert_eq!(v["apply"], false);
        assert_eq!(v["plan"]["wishlist_id"], 2);
        assert!(v.get("result").is_none());
        assert!(v.get("meta").is_none());
    }

    #[test]
    fn result_envelope_carries_pass_meta() {
        let pass_id = Uuid::new_v4();
        let meta = Meta { pass_id: Some(pass_id), status: Some("partial") };
        let env = Envelope::result("aggregate", &json!({"products": []}), Some(meta)).expect("to serialize result");
        assert_eq!(env.body(), Some(&json!({"products": []})));
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["apply"], true);
        assert_eq!(v["meta"]["pass_id"], pass_id.to_string());
        assert_eq!(v["meta"]["status"], "partial");
    }
}
