use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use typed_builder::TypedBuilder;

use crate::mock::{MockApis, MockData};
use crate::models::{
    ActionWhenError, Arguments, Datasource, Extensions, PipelineElement, ScriptType, TimeValue,
    Variable,
};

pub const MAX_NODE_TASK_NUM: u32 = 1000;
pub const MAX_NODE_CPU_SPEC: u32 = 64;

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
    pub extensions: Option<Extensions>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub name: Option<String>,
    pub url: Option<String>,
    pub extensions: Option<Extensions>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub contact: Option<Contact>,
    pub license: Option<License>,
    pub extensions: Option<Extensions>,
}

/// Thread ramp: start at `min`, add `step` every `step_time` up to `max`,
/// then hold for `hold_time`.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Threads {
    pub max: Option<u32>,
    pub min: Option<u32>,
    pub step: Option<u32>,
    pub step_time: Option<TimeValue>,
    pub hold_time: Option<TimeValue>,
    pub extensions: Option<Extensions>,
}

impl Threads {
    pub fn fixed(threads: u32) -> Self {
        Self {
            max: Some(threads),
            ..Self::default()
        }
    }

    pub fn is_ramp(&self) -> bool {
        self.step.is_some_and(|step| step > 0) && self.step_time.is_some()
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnError {
    pub action: ActionWhenError,
    /// Record failed samples, up to `sample_error_num`.
    pub sample_error: bool,
    pub sample_error_num: Option<u32>,
    pub extensions: Option<Extensions>,
}

impl OnError {
    pub fn new(action: ActionWhenError) -> Self {
        Self {
            action,
            sample_error: false,
            sample_error_num: None,
            extensions: None,
        }
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSelectorStrategy {
    pub enabled: Option<bool>,
    pub max_task_num: Option<u32>,
    pub last_executed: Option<bool>,
    pub spec_enabled: Option<bool>,
    pub cpu_spec: Option<u32>,
    pub memory_spec: Option<String>,
    pub disk_spec: Option<String>,
    pub idle_rate_enabled: Option<bool>,
    pub cpu_idle_rate: Option<String>,
    pub memory_idle_rate: Option<String>,
    pub disk_idle_rate: Option<String>,
    pub extensions: Option<Extensions>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSelector {
    pub num: Option<u32>,
    pub available_node_ids: Option<Vec<i64>>,
    pub strategy: Option<NodeSelectorStrategy>,
    pub extensions: Option<Extensions>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setup {
    pub name: Option<String>,
    pub description: Option<String>,
    pub script: Option<String>,
    pub extensions: Option<Extensions>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TearDown {
    pub name: Option<String>,
    pub description: Option<String>,
    pub script: Option<String>,
    pub extensions: Option<Extensions>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub threads: Option<Threads>,
    pub on_error: Option<OnError>,
    pub node_selector: Option<NodeSelector>,
    pub datasources: Option<Vec<Datasource>>,
    pub variables: Option<Vec<Variable>>,
    pub setup: Option<Setup>,
    pub tear_down: Option<TearDown>,
    pub mock_data: Option<MockData>,
    pub mock_apis: Option<Vec<MockApis>>,
    pub extensions: Option<Extensions>,
}

impl Configuration {
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().flatten().find(|variable| variable.name == name)
    }

    pub fn datasource(&self, name: &str) -> Option<&Datasource> {
        self.datasources
            .iter()
            .flatten()
            .find(|datasource| datasource.name == name)
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub arguments: Option<Arguments>,
    pub setup: Option<Setup>,
    pub pipelines: Option<Vec<PipelineElement>>,
    pub mock_data: Option<MockData>,
    pub mock_apis: Option<Vec<MockApis>>,
    pub tear_down: Option<TearDown>,
    pub extensions: Option<Extensions>,
}

impl Task {
    pub fn pipelines(&self) -> &[PipelineElement] {
        self.pipelines.as_deref().unwrap_or_default()
    }

    pub fn enabled_pipelines(&self) -> impl Iterator<Item = &PipelineElement> {
        self.pipelines().iter().filter(|element| element.is_enabled())
    }

    pub fn pipeline(&self, name: &str) -> Option<&PipelineElement> {
        self.pipelines()
            .iter()
            .find(|element| element.name() == Some(name))
    }
}

/// A complete script document.
#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct AngusScript {
    #[builder(default, setter(strip_option, into))]
    pub specification: Option<String>,
    #[builder(default, setter(strip_option, into))]
    pub api_version: Option<String>,
    #[builder(default, setter(strip_option))]
    pub info: Option<Info>,
    #[builder(default, setter(strip_option))]
    pub tags: Option<Vec<String>>,
    #[serde(rename = "type")]
    #[builder(default, setter(strip_option))]
    pub script_type: Option<ScriptType>,
    #[builder(default, setter(strip_option, into))]
    pub plugin: Option<String>,
    #[builder(default, setter(strip_option))]
    pub configuration: Option<Configuration>,
    #[builder(default, setter(strip_option))]
    pub task: Option<Task>,
    #[builder(default, setter(strip_option))]
    pub extensions: Option<Extensions>,
}

impl AngusScript {
    pub fn title(&self) -> Option<&str> {
        self.info.as_ref()?.title.as_deref()
    }

    pub fn pipelines(&self) -> &[PipelineElement] {
        self.task.as_ref().map(Task::pipelines).unwrap_or_default()
    }

    pub fn is_mock(&self) -> bool {
        self.script_type.is_some_and(ScriptType::is_mock)
    }

    /// Runs the documented script checks without modifying the script.
    pub fn check(&self) -> angus_sdk::config::ValidationResult {
        crate::checks::check_script(self)
    }
}
