use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use typed_builder::TypedBuilder;

use crate::models::{
    DefaultExtraction, Extensions, LdapTestType, TargetBase, TargetProjection, TargetSampling,
    TimeLine,
};

pub const DEFAULT_LDAP_PORT: u16 = 389;

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LdapServer {
    pub server: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub root_dn: Option<String>,
    pub extensions: Option<Extensions>,
}

impl LdapServer {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            port: DEFAULT_LDAP_PORT,
            username: None,
            password: None,
            root_dn: None,
            extensions: None,
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LdapResponse {
    pub code: Option<String>,
    pub size: Option<u64>,
    pub timeline: Option<TimeLine>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LdapRequest0 {
    pub data: Option<String>,
    pub size: Option<u64>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct Ldap {
    #[serde(flatten)]
    #[builder(default)]
    pub base: TargetBase,
    pub server: LdapServer,
    pub test_type: LdapTestType,
    /// Use `arguments` as-is instead of the generated test entry.
    #[builder(default, setter(strip_option))]
    pub user_defined: Option<bool>,
    #[builder(default, setter(strip_option, into))]
    pub entry_dn: Option<String>,
    #[builder(default, setter(strip_option))]
    pub arguments: Option<BTreeMap<String, String>>,
    #[builder(default, setter(strip_option, into))]
    pub search_base: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub search_filter: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub delete_entry: Option<String>,
    #[builder(default, setter(strip_option))]
    pub response: Option<LdapResponse>,
    #[serde(flatten)]
    #[builder(default)]
    pub sampling: TargetSampling<DefaultExtraction, DefaultExtraction>,
    #[serde(skip)]
    #[builder(default, setter(skip))]
    pub projection: TargetProjection,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn search_target_round_trips() {
        let ldap = Ldap::builder()
            .base(TargetBase::named("Find people"))
            .server(LdapServer::new("ldap.example.com"))
            .test_type(LdapTestType::Search)
            .search_base("ou=people,dc=example,dc=com")
            .search_filter("(uid=ada)")
            .build();

        let written = serde_json::to_value(&ldap).unwrap();
        assert_eq!(written["testType"], "SEARCH");
        assert_eq!(written["server"], json!({"server": "ldap.example.com", "port": 389}));

        let read: Ldap = serde_json::from_value(written).unwrap();
        assert_eq!(read, ldap);
    }
}
