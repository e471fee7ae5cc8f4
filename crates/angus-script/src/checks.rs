//! Opt-in checks of the documented script invariants.
//!
//! The execution engine stays the authority on what runs; these checks
//! report problems an editor can point at, using dotted paths such as
//! `task.pipelines[2].assertions[0].expected`. Nothing here mutates the
//! script.

use angus_sdk::config::{
    ErrorSeverity, ValidationError, ValidationErrorCode, ValidationResult, ValidationWarning,
};
use serde_json::Value;
use tracing::debug;

use crate::mock::{MockApis, MockData};
use crate::models::{
    AngusScript, Assertion, AssertionResultConstants, AssertionType, Configuration, Dataset,
    MAX_MATCH_ITEM, MAX_NODE_CPU_SPEC, MAX_NODE_TASK_NUM, NodeSelector, OnError,
    PipelineElement, TargetSampling, Threads,
};
use crate::protocols::{Ftp, Jdbc, WebSocket};

pub const UNKNOWN_REFERENCE: &str = "UNKNOWN_REFERENCE";
pub const UNBALANCED_TRANSACTION: &str = "UNBALANCED_TRANSACTION";
pub const DUPLICATE_NAME: &str = "DUPLICATE_NAME";
pub const MISSING_MESSAGE: &str = "MISSING_MESSAGE";

/// Collects findings under a dotted path.
struct Checks {
    result: ValidationResult,
}

impl Checks {
    fn new() -> Self {
        Self {
            result: ValidationResult::ok(),
        }
    }

    fn require(&mut self, present: bool, path: String, message: &str) {
        if !present {
            self.result.push_error(ValidationError::new(
                ValidationErrorCode::RequiredPropertyMissing,
                path,
                message,
            ));
        }
    }

    fn at_least(&mut self, value: Option<u32>, min: u32, path: String) {
        if let Some(value) = value.filter(|value| *value < min) {
            self.result.push_error(
                ValidationError::new(
                    ValidationErrorCode::ValueTooSmall,
                    path,
                    format!("must be at least {min}"),
                )
                .value(Value::from(value))
                .expected(Value::from(min)),
            );
        }
    }

    fn at_most(&mut self, value: Option<u32>, max: u32, path: String) {
        if let Some(value) = value.filter(|value| *value > max) {
            self.result.push_error(
                ValidationError::new(
                    ValidationErrorCode::ValueTooLarge,
                    path,
                    format!("must be at most {max}"),
                )
                .value(Value::from(value))
                .expected(Value::from(max)),
            );
        }
    }

    fn fail(&mut self, code: &str, path: String, message: impl Into<String>) {
        self.result.push_error(ValidationError::with_code(
            code,
            path,
            message,
            ErrorSeverity::High,
        ));
    }

    fn finish(self) -> ValidationResult {
        self.result
    }
}

/// Checks a whole script document.
pub fn check_script(script: &AngusScript) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if let Some(configuration) = &script.configuration {
        result.merge(check_configuration(configuration, "configuration"));
    }
    if let Some(task) = &script.task {
        result.merge(check_pipeline(task.pipelines(), "task.pipelines"));
        if let Some(mock_data) = &task.mock_data {
            result.merge(check_mock_data(mock_data, "task.mockData"));
        }
        for (index, apis) in task.mock_apis.iter().flatten().enumerate() {
            result.merge(check_mock_apis(apis, &format!("task.mockApis[{index}]")));
        }
    }

    debug!(
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "checked script"
    );
    result
}

pub fn check_configuration(configuration: &Configuration, path: &str) -> ValidationResult {
    let mut result = ValidationResult::ok();
    if let Some(threads) = &configuration.threads {
        result.merge(check_threads(threads, &format!("{path}.threads")));
    }
    if let Some(on_error) = &configuration.on_error {
        result.merge(check_on_error(on_error, &format!("{path}.onError")));
    }
    if let Some(selector) = &configuration.node_selector {
        result.merge(check_node_selector(selector, &format!("{path}.nodeSelector")));
    }
    if let Some(mock_data) = &configuration.mock_data {
        result.merge(check_mock_data(mock_data, &format!("{path}.mockData")));
    }
    for (index, apis) in configuration.mock_apis.iter().flatten().enumerate() {
        result.merge(check_mock_apis(apis, &format!("{path}.mockApis[{index}]")));
    }
    result
}

pub fn check_threads(threads: &Threads, path: &str) -> ValidationResult {
    let mut checks = Checks::new();
    checks.at_least(threads.max, 1, format!("{path}.max"));
    if let (Some(min), Some(max)) = (threads.min, threads.max) {
        checks.at_most(Some(min), max, format!("{path}.min"));
    }
    checks.finish()
}

pub fn check_on_error(on_error: &OnError, path: &str) -> ValidationResult {
    let mut checks = Checks::new();
    if on_error.sample_error {
        checks.require(
            on_error.sample_error_num.is_some(),
            format!("{path}.sampleErrorNum"),
            "sampleErrorNum is required when sampleError is on",
        );
        checks.at_least(on_error.sample_error_num, 1, format!("{path}.sampleErrorNum"));
    }
    checks.finish()
}

pub fn check_node_selector(selector: &NodeSelector, path: &str) -> ValidationResult {
    let mut checks = Checks::new();
    if let Some(strategy) = &selector.strategy {
        checks.at_most(
            strategy.max_task_num,
            MAX_NODE_TASK_NUM,
            format!("{path}.strategy.maxTaskNum"),
        );
        checks.at_most(
            strategy.cpu_spec,
            MAX_NODE_CPU_SPEC,
            format!("{path}.strategy.cpuSpec"),
        );
    }
    checks.finish()
}

pub fn check_assertion<E>(assertion: &Assertion<E>, path: &str) -> ValidationResult {
    let mut checks = Checks::new();
    let condition = assertion.assertion_condition;

    if condition.needs_expected() {
        checks.require(
            assertion.expected.is_some(),
            format!("{path}.expected"),
            AssertionResultConstants::EXPECTED_VALUE_IS_EMPTY,
        );
    }
    if let Some(message) = AssertionResultConstants::missing_expression(condition) {
        checks.require(
            assertion.expression.is_some(),
            format!("{path}.expression"),
            message,
        );
    }
    if assertion.assertion_type == AssertionType::Header {
        checks.require(
            assertion.parameter_name.is_some(),
            format!("{path}.parameterName"),
            "parameterName is required for HEADER assertions",
        );
    }
    checks.at_most(assertion.match_item, MAX_MATCH_ITEM, format!("{path}.matchItem"));

    if assertion.assertion_type.is_numeric() && condition.is_numeric_comparison() {
        let numeric = assertion
            .expected
            .as_deref()
            .is_none_or(|expected| expected.trim().parse::<f64>().is_ok());
        if !numeric {
            checks.fail(
                ValidationErrorCode::TypeMismatch.as_str(),
                format!("{path}.expected"),
                AssertionResultConstants::EXPECTED_VALUE_IS_NOT_NUMBER,
            );
        }
    }
    checks.finish()
}

pub fn check_dataset(dataset: &Dataset, path: &str) -> ValidationResult {
    let mut checks = Checks::new();
    checks.require(
        !dataset.parameters.is_empty(),
        format!("{path}.parameters"),
        "dataset needs at least one parameter",
    );
    if let Some(name) = dataset.duplicate_parameter() {
        checks.fail(
            DUPLICATE_NAME,
            format!("{path}.parameters"),
            format!("parameter '{name}' is declared more than once"),
        );
    }
    checks.finish()
}

pub fn check_sampling<A, V>(sampling: &TargetSampling<A, V>, path: &str) -> ValidationResult {
    let mut result = ValidationResult::ok();
    for (index, assertion) in sampling.assertions().iter().enumerate() {
        result.merge(check_assertion(assertion, &format!("{path}.assertions[{index}]")));
    }
    for (index, dataset) in sampling.datasets().iter().enumerate() {
        result.merge(check_dataset(dataset, &format!("{path}.datasets[{index}]")));
    }
    result
}

pub fn check_ftp(ftp: &Ftp, path: &str) -> ValidationResult {
    let mut checks = Checks::new();
    for field in ftp.missing_fields() {
        checks.require(false, format!("{path}.{field}"), "required for this transfer");
    }
    checks.finish()
}

pub fn check_jdbc(jdbc: &Jdbc, path: &str) -> ValidationResult {
    let mut checks = Checks::new();
    checks.require(
        !jdbc.is_missing_arguments(),
        format!("{path}.arguments"),
        "arguments are required for callable and prepared statements",
    );
    checks.finish()
}

fn check_websocket(socket: &WebSocket, path: &str) -> ValidationResult {
    let mut result = ValidationResult::ok();
    if socket.is_missing_message() {
        result.push_warning(ValidationWarning::new(
            MISSING_MESSAGE,
            format!("{path}.message"),
            "sending mode without a message sends nothing",
        ));
    }
    result
}

/// Checks each element, its references and transaction pairing.
pub fn check_pipeline(elements: &[PipelineElement], path: &str) -> ValidationResult {
    let mut result = ValidationResult::ok();
    for (index, element) in elements.iter().enumerate() {
        result.merge(check_element(element, &format!("{path}[{index}]")));
    }

    let mut checks = Checks::new();
    for (index, element) in elements.iter().enumerate() {
        let Some(before) = element.base().before_name.as_deref() else {
            continue;
        };
        let known = elements
            .iter()
            .enumerate()
            .any(|(other, candidate)| other != index && candidate.name() == Some(before));
        if !known {
            checks.fail(
                UNKNOWN_REFERENCE,
                format!("{path}[{index}].beforeName"),
                format!("no other element is named '{before}'"),
            );
        }
    }

    let mut open: Vec<(usize, String)> = Vec::new();
    for (index, element) in elements.iter().enumerate() {
        match element {
            PipelineElement::TransStart(start) => match start.base.name() {
                Some(name) => open.push((index, name.to_lowercase())),
                None => checks.require(
                    false,
                    format!("{path}[{index}].name"),
                    "transactions need a name",
                ),
            },
            PipelineElement::TransEnd(end) => {
                let Some(name) = end.base.name() else {
                    checks.require(
                        false,
                        format!("{path}[{index}].name"),
                        "transactions need a name",
                    );
                    continue;
                };
                let closes = open
                    .last()
                    .is_some_and(|(_, started)| *started == name.to_lowercase());
                if closes {
                    open.pop();
                } else {
                    checks.fail(
                        UNBALANCED_TRANSACTION,
                        format!("{path}[{index}]"),
                        format!("TRANS_END '{name}' has no matching TRANS_START"),
                    );
                }
            }
            _ => {}
        }
    }
    for (index, name) in open {
        checks.fail(
            UNBALANCED_TRANSACTION,
            format!("{path}[{index}]"),
            format!("TRANS_START '{name}' is never closed"),
        );
    }

    result.merge(checks.finish());
    result
}

pub fn check_element(element: &PipelineElement, path: &str) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let mut checks = Checks::new();
    match element {
        PipelineElement::Http(http) => result.merge(check_sampling(&http.sampling, path)),
        PipelineElement::WebSocket(socket) => {
            result.merge(check_sampling(&socket.sampling, path));
            result.merge(check_websocket(socket, path));
        }
        PipelineElement::Jdbc(jdbc) => {
            result.merge(check_sampling(&jdbc.sampling, path));
            result.merge(check_jdbc(jdbc, path));
        }
        PipelineElement::Ftp(ftp) => {
            result.merge(check_sampling(&ftp.sampling, path));
            result.merge(check_ftp(ftp, path));
        }
        PipelineElement::Tcp(tcp) => result.merge(check_sampling(&tcp.sampling, path)),
        PipelineElement::Smtp(smtp) => result.merge(check_sampling(&smtp.sampling, path)),
        PipelineElement::Mail(mail) => result.merge(check_sampling(&mail.sampling, path)),
        PipelineElement::Ldap(ldap) => result.merge(check_sampling(&ldap.sampling, path)),
        PipelineElement::Rendezvous(rendezvous) => {
            checks.at_least(Some(rendezvous.threads), 1, format!("{path}.threads"));
        }
        PipelineElement::Throughput(throughput) => {
            checks.at_least(
                Some(throughput.permits_per_second),
                1,
                format!("{path}.permitsPerSecond"),
            );
        }
        PipelineElement::WaitingTime(waiting) => {
            if waiting.min_wait_time_in_ms > waiting.max_wait_time_in_ms {
                checks.fail(
                    ValidationErrorCode::ValueTooLarge.as_str(),
                    format!("{path}.minWaitTimeInMs"),
                    "minWaitTimeInMs must not exceed maxWaitTimeInMs",
                );
            }
        }
        PipelineElement::TransStart(_) | PipelineElement::TransEnd(_) => {}
    }
    result.merge(checks.finish());
    result
}

pub fn check_mock_data(mock_data: &MockData, path: &str) -> ValidationResult {
    let mut checks = Checks::new();
    checks.require(
        !mock_data.fields.is_empty(),
        format!("{path}.fields"),
        "mock data needs at least one field",
    );
    checks.finish()
}

pub fn check_mock_apis(apis: &MockApis, path: &str) -> ValidationResult {
    let mut checks = Checks::new();
    if let Some(name) = apis.duplicate_response() {
        checks.fail(
            DUPLICATE_NAME,
            format!("{path}.responses"),
            format!("response '{name}' is declared more than once"),
        );
    }
    checks.finish()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::{AssertionCondition, DefaultExtraction};

    fn pipeline(value: Value) -> Vec<PipelineElement> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn emptiness_assertions_need_no_expected_value() {
        let assertion: Assertion<DefaultExtraction> = Assertion::builder()
            .name("body present")
            .assertion_type(AssertionType::Body)
            .assertion_condition(AssertionCondition::NotEmpty)
            .build();
        assert!(check_assertion(&assertion, "a").valid);
    }

    #[test]
    fn pattern_assertions_need_an_expression() {
        let assertion: Assertion<DefaultExtraction> = Assertion::builder()
            .name("token")
            .assertion_type(AssertionType::Body)
            .assertion_condition(AssertionCondition::JsonPathMatch)
            .expected("abc")
            .build();

        let result = check_assertion(&assertion, "a");
        let error = result.errors_at("a.expression").next().unwrap();
        assert_eq!(error.message, "Expected JSONPath expression is empty");
    }

    #[test]
    fn header_assertions_need_a_parameter_name() {
        let assertion: Assertion<DefaultExtraction> = Assertion::builder()
            .name("json")
            .assertion_type(AssertionType::Header)
            .assertion_condition(AssertionCondition::Contain)
            .expected("json")
            .match_item(5000)
            .build();

        let result = check_assertion(&assertion, "a");
        assert_eq!(result.errors_at("a.parameterName").count(), 1);
        assert!(result.has_error(ValidationErrorCode::ValueTooLarge));
    }

    #[test]
    fn numeric_comparisons_need_numbers() {
        let assertion: Assertion<DefaultExtraction> = Assertion::builder()
            .name("fast")
            .assertion_type(AssertionType::Duration)
            .assertion_condition(AssertionCondition::LessThan)
            .expected("soon")
            .build();

        let result = check_assertion(&assertion, "a");
        assert!(result.has_error(ValidationErrorCode::TypeMismatch));
    }

    #[test]
    fn before_names_must_resolve() {
        let elements = pipeline(json!([
            {"target": "WAITING_TIME", "name": "think", "beforeName": "missing",
             "minWaitTimeInMs": 1, "maxWaitTimeInMs": 2},
            {"target": "THROUGHPUT", "name": "limit", "beforeName": "think", "permitsPerSecond": 5}
        ]));

        let result = check_pipeline(&elements, "p");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, "p[0].beforeName");
        assert_eq!(result.errors[0].code, UNKNOWN_REFERENCE);
    }

    #[test]
    fn transactions_pair_case_insensitively() {
        let balanced = pipeline(json!([
            {"target": "TRANS_START", "name": "Checkout"},
            {"target": "RENDEZVOUS", "threads": 2},
            {"target": "TRANS_END", "name": "checkout"}
        ]));
        assert!(check_pipeline(&balanced, "p").valid);

        let unbalanced = pipeline(json!([
            {"target": "TRANS_END", "name": "pay"},
            {"target": "TRANS_START", "name": "ship"}
        ]));
        let result = check_pipeline(&unbalanced, "p");
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors.iter().all(|error| error.code == UNBALANCED_TRANSACTION));
    }

    #[test]
    fn structural_bounds_are_checked() {
        let elements = pipeline(json!([
            {"target": "RENDEZVOUS", "threads": 0},
            {"target": "THROUGHPUT", "permitsPerSecond": 0},
            {"target": "WAITING_TIME", "minWaitTimeInMs": 500, "maxWaitTimeInMs": 100}
        ]));

        let result = check_pipeline(&elements, "p");
        assert_eq!(result.errors_at("p[0].threads").count(), 1);
        assert_eq!(result.errors_at("p[1].permitsPerSecond").count(), 1);
        assert_eq!(result.errors_at("p[2].minWaitTimeInMs").count(), 1);
    }

    #[test]
    fn threads_and_error_sampling_bounds() {
        let threads = Threads {
            max: Some(5),
            min: Some(10),
            ..Threads::default()
        };
        assert_eq!(check_threads(&threads, "t").errors_at("t.min").count(), 1);
        assert!(!check_threads(&Threads::fixed(0), "t").valid);

        let on_error = OnError {
            sample_error: true,
            ..OnError::new(crate::models::ActionWhenError::Continue)
        };
        assert!(!check_on_error(&on_error, "e").valid);
    }

    #[test]
    fn datasets_need_unique_parameters() {
        let dataset: Dataset = serde_json::from_value(json!({
            "name": "users",
            "parameters": [{"name": "id"}, {"name": "id"}]
        }))
        .unwrap();
        let result = check_dataset(&dataset, "d");
        assert_eq!(result.errors[0].code, DUPLICATE_NAME);

        let empty = Dataset::new("empty", Vec::new());
        assert!(!check_dataset(&empty, "d").valid);
    }
}
