use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::common::{Id, Timestamp};

crate::literal_enum! {
    pub enum UserRole {
        Admin = "admin",
        User = "user",
        Guest = "guest",
        Moderator = "moderator",
    }
}

crate::literal_enum! {
    pub enum ResourceStatus {
        Active = "active",
        Inactive = "inactive",
        Processing = "processing",
        Error = "error",
        Pending = "pending",
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseEntity {
    pub id: Id,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: u64,
}

impl BaseEntity {
    pub fn touch(&mut self, at: Timestamp) {
        self.updated_at = at;
        self.version += 1;
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    pub entity: BaseEntity,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub is_active: bool,
    pub role: UserRole,
    pub metadata: Option<BTreeMap<String, Value>>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(flatten)]
    pub entity: BaseEntity,
    pub key: String,
    pub value: Value,
    pub category: String,
    pub is_sensitive: bool,
    pub description: Option<String>,
}

impl Config {
    /// Value suitable for logs: sensitive entries are masked.
    pub fn display_value(&self) -> String {
        if self.is_sensitive {
            "******".to_string()
        } else {
            self.value.to_string()
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    #[serde(flatten)]
    pub entity: BaseEntity,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub description: Option<String>,
    pub status: ResourceStatus,
    pub metadata: Option<BTreeMap<String, Value>>,
}
