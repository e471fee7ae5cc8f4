use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use typed_builder::TypedBuilder;

use crate::models::{
    ActionOnEof, Assertion, Dataset, DefaultExtraction, Extensions, PipelineElementKind,
    SharingMode, TestTargetConstants,
};
use crate::protocols::{Ftp, Http, Jdbc, Ldap, Mail, Smtp, Tcp, WebSocket};

pub const DEFAULT_TIMEOUT_IN_MS: u64 = 30_000;

/// Fields shared by every pipeline element.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct TargetBase {
    #[builder(default, setter(strip_option, into))]
    pub name: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub description: Option<String>,
    #[builder(default, setter(strip_option))]
    pub enabled: Option<bool>,
    /// Name of the element this one must run before.
    #[builder(default, setter(strip_option, into))]
    pub before_name: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub transaction_name: Option<String>,
    #[builder(default, setter(strip_option))]
    pub extensions: Option<Extensions>,
}

impl TargetBase {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Sampling configuration carried by protocol targets.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSampling<A = DefaultExtraction, V = DefaultExtraction> {
    pub assertions: Option<Vec<Assertion<A>>>,
    pub variables: Option<Vec<V>>,
    pub datasets: Option<Vec<Dataset>>,
    #[serde(rename = "actionOnEOF")]
    pub action_on_eof: Option<ActionOnEof>,
    pub sharing_mode: Option<SharingMode>,
}

impl<A, V> Default for TargetSampling<A, V> {
    fn default() -> Self {
        Self {
            assertions: None,
            variables: None,
            datasets: None,
            action_on_eof: None,
            sharing_mode: None,
        }
    }
}

impl<A, V> TargetSampling<A, V> {
    pub fn assertions(&self) -> &[Assertion<A>] {
        self.assertions.as_deref().unwrap_or_default()
    }

    pub fn variables(&self) -> &[V] {
        self.variables.as_deref().unwrap_or_default()
    }

    pub fn datasets(&self) -> &[Dataset] {
        self.datasets.as_deref().unwrap_or_default()
    }

    pub fn is_assertive(&self) -> bool {
        self.assertions().iter().any(Assertion::is_enabled)
    }

    pub fn has_extractable_assertion(&self) -> bool {
        self.assertions().iter().any(Assertion::is_extractable)
    }

    pub fn action_on_eof(&self) -> ActionOnEof {
        self.action_on_eof.unwrap_or_default()
    }

    pub fn sharing_mode(&self) -> SharingMode {
        self.sharing_mode.unwrap_or_default()
    }
}

/// Values the engine resolves for a target at run time. Never serialized.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TargetProjection {
    pub in_transaction: Option<bool>,
    pub has_mock_value: Option<bool>,
    pub has_dynamic_value: Option<bool>,
    pub need_dataset: Option<bool>,
    pub actual_action_on_eof: Option<ActionOnEof>,
    pub actual_sharing_mode: Option<SharingMode>,
    pub mock_tokens: BTreeMap<String, String>,
    pub operation_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
pub struct TransStartElement {
    #[serde(flatten)]
    #[builder(default)]
    pub base: TargetBase,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
pub struct TransEndElement {
    #[serde(flatten)]
    #[builder(default)]
    pub base: TargetBase,
}

/// Barrier that releases once `threads` threads arrive.
#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct RendezvousElement {
    #[serde(flatten)]
    #[builder(default)]
    pub base: TargetBase,
    pub threads: u32,
    #[builder(default, setter(strip_option))]
    pub timeout_in_ms: Option<u64>,
}

impl RendezvousElement {
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_in_ms.unwrap_or(DEFAULT_TIMEOUT_IN_MS)
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ThroughputElement {
    #[serde(flatten)]
    #[builder(default)]
    pub base: TargetBase,
    pub permits_per_second: u32,
    #[builder(default, setter(strip_option))]
    pub timeout_in_ms: Option<u64>,
}

impl ThroughputElement {
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_in_ms.unwrap_or(DEFAULT_TIMEOUT_IN_MS)
    }
}

/// Think time drawn between the two bounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct WaitingTimeElement {
    #[serde(flatten)]
    #[builder(default)]
    pub base: TargetBase,
    pub min_wait_time_in_ms: u64,
    pub max_wait_time_in_ms: u64,
}

impl WaitingTimeElement {
    pub fn fixed(wait_in_ms: u64) -> Self {
        Self {
            base: TargetBase::default(),
            min_wait_time_in_ms: wait_in_ms,
            max_wait_time_in_ms: wait_in_ms,
        }
    }
}

/// One step of a task pipeline, selected by its `target` tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target")]
pub enum PipelineElement {
    #[serde(rename = "HTTP")]
    Http(Box<Http>),
    #[serde(rename = "WEBSOCKET")]
    WebSocket(Box<WebSocket>),
    #[serde(rename = "JDBC")]
    Jdbc(Box<Jdbc>),
    #[serde(rename = "TCP")]
    Tcp(Box<Tcp>),
    #[serde(rename = "SMTP")]
    Smtp(Box<Smtp>),
    #[serde(rename = "MAIL")]
    Mail(Box<Mail>),
    #[serde(rename = "FTP")]
    Ftp(Box<Ftp>),
    #[serde(rename = "LDAP")]
    Ldap(Box<Ldap>),
    #[serde(rename = "RENDEZVOUS")]
    Rendezvous(RendezvousElement),
    #[serde(rename = "THROUGHPUT")]
    Throughput(ThroughputElement),
    #[serde(rename = "TRANS_START")]
    TransStart(TransStartElement),
    #[serde(rename = "TRANS_END")]
    TransEnd(TransEndElement),
    #[serde(rename = "WAITING_TIME")]
    WaitingTime(WaitingTimeElement),
}

impl PipelineElement {
    pub fn kind(&self) -> PipelineElementKind {
        match self {
            Self::Rendezvous(_) => PipelineElementKind::Rendezvous,
            Self::Throughput(_) => PipelineElementKind::Throughput,
            Self::TransStart(_) => PipelineElementKind::StartTransaction,
            Self::TransEnd(_) => PipelineElementKind::EndTransaction,
            Self::WaitingTime(_) => PipelineElementKind::WaitingTime,
            _ => PipelineElementKind::Target,
        }
    }

    /// The `target` tag written for this element.
    pub fn target(&self) -> &'static str {
        match self {
            Self::Http(_) => TestTargetConstants::TYPE_TARGET_HTTP,
            Self::WebSocket(_) => TestTargetConstants::TYPE_TARGET_WEBSOCKET,
            Self::Jdbc(_) => TestTargetConstants::TYPE_TARGET_JDBC,
            Self::Tcp(_) => TestTargetConstants::TYPE_TARGET_TCP,
            Self::Smtp(_) => TestTargetConstants::TYPE_TARGET_SMTP,
            Self::Mail(_) => TestTargetConstants::TYPE_TARGET_MAIL,
            Self::Ftp(_) => TestTargetConstants::TYPE_TARGET_FTP,
            Self::Ldap(_) => TestTargetConstants::TYPE_TARGET_LDAP,
            Self::Rendezvous(_) => TestTargetConstants::TYPE_PIPELINE_RENDEZVOUS,
            Self::Throughput(_) => TestTargetConstants::TYPE_PIPELINE_THROUGHPUT,
            Self::TransStart(_) => TestTargetConstants::TYPE_PIPELINE_TRANS_START,
            Self::TransEnd(_) => TestTargetConstants::TYPE_PIPELINE_TRANS_END,
            Self::WaitingTime(_) => TestTargetConstants::TYPE_PIPELINE_WAITING_TIME,
        }
    }

    pub fn is_target(&self) -> bool {
        self.kind() == PipelineElementKind::Target
    }

    pub fn is_enabled(&self) -> bool {
        self.base().is_enabled()
    }

    pub fn name(&self) -> Option<&str> {
        self.base().name()
    }

    pub fn base(&self) -> &TargetBase {
        match self {
            Self::Http(target) => &target.base,
            Self::WebSocket(target) => &target.base,
            Self::Jdbc(target) => &target.base,
            Self::Tcp(target) => &target.base,
            Self::Smtp(target) => &target.base,
            Self::Mail(target) => &target.base,
            Self::Ftp(target) => &target.base,
            Self::Ldap(target) => &target.base,
            Self::Rendezvous(element) => &element.base,
            Self::Throughput(element) => &element.base,
            Self::TransStart(element) => &element.base,
            Self::TransEnd(element) => &element.base,
            Self::WaitingTime(element) => &element.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut TargetBase {
        match self {
            Self::Http(target) => &mut target.base,
            Self::WebSocket(target) => &mut target.base,
            Self::Jdbc(target) => &mut target.base,
            Self::Tcp(target) => &mut target.base,
            Self::Smtp(target) => &mut target.base,
            Self::Mail(target) => &mut target.base,
            Self::Ftp(target) => &mut target.base,
            Self::Ldap(target) => &mut target.base,
            Self::Rendezvous(element) => &mut element.base,
            Self::Throughput(element) => &mut element.base,
            Self::TransStart(element) => &mut element.base,
            Self::TransEnd(element) => &mut element.base,
            Self::WaitingTime(element) => &mut element.base,
        }
    }
}

impl From<Http> for PipelineElement {
    fn from(value: Http) -> Self {
        Self::Http(Box::new(value))
    }
}

impl From<Jdbc> for PipelineElement {
    fn from(value: Jdbc) -> Self {
        Self::Jdbc(Box::new(value))
    }
}

impl From<Ftp> for PipelineElement {
    fn from(value: Ftp) -> Self {
        Self::Ftp(Box::new(value))
    }
}

impl From<RendezvousElement> for PipelineElement {
    fn from(value: RendezvousElement) -> Self {
        Self::Rendezvous(value)
    }
}

impl From<ThroughputElement> for PipelineElement {
    fn from(value: ThroughputElement) -> Self {
        Self::Throughput(value)
    }
}

impl From<WaitingTimeElement> for PipelineElement {
    fn from(value: WaitingTimeElement) -> Self {
        Self::WaitingTime(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn structural_elements_dispatch_on_target_tag() {
        let elements: Vec<PipelineElement> = serde_json::from_value(json!([
            {"target": "TRANS_START", "name": "checkout"},
            {"target": "RENDEZVOUS", "name": "gate", "threads": 50},
            {"target": "WAITING_TIME", "minWaitTimeInMs": 100, "maxWaitTimeInMs": 300},
            {"target": "TRANS_END", "name": "checkout", "enabled": false}
        ]))
        .unwrap();

        assert_eq!(elements[0].kind(), PipelineElementKind::StartTransaction);
        assert_eq!(elements[1].target(), "RENDEZVOUS");
        assert!(!elements[2].is_target());
        assert!(!elements[3].is_enabled());
        match &elements[1] {
            PipelineElement::Rendezvous(gate) => {
                assert_eq!(gate.threads, 50);
                assert_eq!(gate.timeout_ms(), DEFAULT_TIMEOUT_IN_MS);
            }
            other => panic!("unexpected element {other:?}"),
        }
    }

    #[test]
    fn elements_write_their_tag_and_skip_absent_fields() {
        let element: PipelineElement = ThroughputElement::builder()
            .base(TargetBase::named("limit"))
            .permits_per_second(20)
            .build()
            .into();

        assert_eq!(
            serde_json::to_value(&element).unwrap(),
            json!({"target": "THROUGHPUT", "name": "limit", "permitsPerSecond": 20})
        );
    }

    #[test]
    fn sampling_defaults_follow_enum_defaults() {
        let sampling: TargetSampling = TargetSampling::default();
        assert_eq!(sampling.action_on_eof(), ActionOnEof::Recycle);
        assert_eq!(sampling.sharing_mode(), SharingMode::AllThread);
        assert!(sampling.assertions().is_empty());
        assert!(!sampling.is_assertive());
    }

    #[test]
    fn base_mut_renames_any_element() {
        let mut element = PipelineElement::from(WaitingTimeElement::fixed(250));
        element.base_mut().name = Some("think".to_string());
        assert_eq!(element.name(), Some("think"));
    }
}
