use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile record as returned by the backend and persisted under `user`.
///
/// Any JSON object is accepted. A modelled field whose value has an
/// unexpected shape is left unset and its raw value kept in `extra`, as are
/// fields the client does not model, so a profile survives a storage round
/// trip unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "UserRole::is_unknown")]
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("there")
    }

    fn from_object(mut fields: Map<String, Value>) -> Self {
        let id = if fields.contains_key("id") {
            take_field(&mut fields, "id")
        } else {
            take_field(&mut fields, "_id")
        };

        UserProfile {
            id,
            name: take_field(&mut fields, "name"),
            email: take_field(&mut fields, "email"),
            role: take_role(&mut fields),
            country: take_field(&mut fields, "country"),
            gender: take_field(&mut fields, "gender"),
            profile_image: take_field(&mut fields, "profileImage"),
            cover_image: take_field(&mut fields, "coverImage"),
            created_at: take_timestamp(&mut fields, "createdAt"),
            updated_at: take_timestamp(&mut fields, "updatedAt"),
            extra: fields,
        }
    }
}

impl<'de> Deserialize<'de> for UserProfile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(UserProfile::from_object)
    }
}

/// Move `key` out of `fields` if it parses as `T`. A null is dropped; any
/// other value that does not fit stays in `fields` untouched.
fn take_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    let raw = fields.remove(key)?;
    if raw.is_null() {
        return None;
    }
    match serde_json::from_value(raw.clone()) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Keeping unparsed profile field {}: {}", key, e);
            fields.insert(key.to_string(), raw);
            None
        }
    }
}

fn take_role(fields: &mut Map<String, Value>) -> UserRole {
    match fields.get("role") {
        None => UserRole::default(),
        Some(Value::Null) => {
            fields.remove("role");
            UserRole::default()
        }
        Some(Value::String(s)) => match UserRole::from_name(s) {
            UserRole::Unknown => UserRole::Unknown,
            role => {
                fields.remove("role");
                role
            }
        },
        Some(_) => UserRole::Unknown,
    }
}

/// RFC 3339 timestamps, or a bare date taken as midnight UTC.
fn take_timestamp(fields: &mut Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    let parsed = match fields.get(key)? {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|t| t.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|t| t.and_utc())
            }),
        Value::Null => None,
        _ => return None,
    };

    if parsed.is_some() || fields.get(key).is_some_and(Value::is_null) {
        fields.remove(key);
    }
    parsed
}

/// Image reference as the backend sends it: a bare URL or an upload
/// record carrying one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub Value);

impl ImageRef {
    pub fn url(&self) -> Option<&str> {
        match &self.0 {
            Value::String(url) => Some(url),
            Value::Object(record) => ["secure_url", "url"]
                .iter()
                .find_map(|key| record.get(*key).and_then(Value::as_str)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
    Business,
    #[serde(other)]
    Unknown,
}

impl UserRole {
    fn from_name(name: &str) -> Self {
        match name {
            "user" => UserRole::User,
            "admin" => UserRole::Admin,
            "business" => UserRole::Business,
            _ => UserRole::Unknown,
        }
    }

    fn is_unknown(&self) -> bool {
        *self == UserRole::Unknown
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserRole::User => "Member",
            UserRole::Admin => "Administrator",
            UserRole::Business => "Business",
            UserRole::Unknown => "Guest",
        }
    }
}
