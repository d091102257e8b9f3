use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Role;

/// The decoded payload of a session token.
///
/// The subject id is read from `id` (falling back to the registered `sub`
/// claim) and may be issued as either a string or a number.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "RawClaims")]
pub struct Claims {
    pub id: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Any additional claim fields we don't explicitly model.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Wire shape of the payload before the subject id is normalised.
#[derive(Deserialize)]
struct RawClaims {
    id: Option<Value>,
    sub: Option<Value>,
    role: String,
    iat: i64,
    exp: i64,
    name: Option<String>,
    email: Option<String>,
    #[serde(flatten)]
    extra: HashMap<String, Value>,
}

impl TryFrom<RawClaims> for Claims {
    type Error = String;

    fn try_from(raw: RawClaims) -> Result<Self, Self::Error> {
        let mut extra = raw.extra;
        let id = match (raw.id, raw.sub) {
            (Some(id), sub) => {
                if let Some(sub) = sub {
                    extra.insert("sub".to_string(), sub);
                }
                id
            }
            (None, Some(sub)) => sub,
            (None, None) => return Err("missing subject id ('id' or 'sub')".to_string()),
        };

        Ok(Claims {
            id: subject_to_string(id)?,
            role: raw.role,
            iat: raw.iat,
            exp: raw.exp,
            name: raw.name,
            email: raw.email,
            extra,
        })
    }
}

fn subject_to_string(value: Value) -> Result<String, String> {
    match value {
        Value::String(s) if !s.is_empty() => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(format!("invalid subject id: {}", other)),
    }
}

impl Claims {
    /// The role as one of the known tags, or `None` for anything else.
    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }

    /// True when `exp` lies strictly after `now` (unix seconds).
    pub fn is_valid_at(&self, now: i64) -> bool {
        self.exp > now
    }

    /// First word of the user's name, as shown in the navigation bar.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .and_then(|name| name.split_whitespace().next())
    }

    /// Upper-cased first letter of the name, `U` when there is none.
    pub fn initial(&self) -> String {
        self.name
            .as_deref()
            .and_then(|name| name.trim_start().chars().next())
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "U".to_string())
    }
}
