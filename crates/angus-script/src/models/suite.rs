use std::collections::BTreeMap;

use angus_sdk::literal_enum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AngusMeterConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: String,
    pub enabled: bool,
}

literal_enum! {
    pub enum TestStatus {
        Passed = "passed",
        Failed = "failed",
        Skipped = "skipped",
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub name: String,
    pub status: TestStatus,
    /// Milliseconds.
    pub duration: u64,
    pub error: Option<String>,
}

literal_enum! {
    pub enum TestCaseType {
        Api = "api",
        Ui = "ui",
        Performance = "performance",
        Integration = "integration",
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub case_type: TestCaseType,
    #[serde(default)]
    pub config: BTreeMap<String, Value>,
}

#[skip_serializing_none]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuite {
    pub name: String,
    pub description: Option<String>,
    pub tests: Vec<TestCase>,
}

impl TestSuite {
    pub fn cases_of(&self, case_type: TestCaseType) -> impl Iterator<Item = &TestCase> {
        self.tests
            .iter()
            .filter(move |case| case.case_type == case_type)
    }
}

/// Totals over a set of results.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TestSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration: u64,
}

impl TestSummary {
    pub fn of<'a>(results: impl IntoIterator<Item = &'a TestResult>) -> Self {
        results.into_iter().fold(Self::default(), |mut summary, result| {
            match result.status {
                TestStatus::Passed => summary.passed += 1,
                TestStatus::Failed => summary.failed += 1,
                TestStatus::Skipped => summary.skipped += 1,
            }
            summary.duration += result.duration;
            summary
        })
    }

    pub fn is_green(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn suite_filters_cases_by_type() {
        let suite: TestSuite = serde_json::from_value(json!({
            "name": "smoke",
            "tests": [
                {"name": "login", "type": "api", "config": {"retries": 1}},
                {"name": "load", "type": "performance"}
            ]
        }))
        .unwrap();

        assert_eq!(suite.cases_of(TestCaseType::Performance).count(), 1);
        assert!(suite.tests[1].config.is_empty());
    }

    #[test]
    fn summary_counts_each_status() {
        let results = [
            TestResult {
                name: "a".to_string(),
                status: TestStatus::Passed,
                duration: 10,
                error: None,
            },
            TestResult {
                name: "b".to_string(),
                status: TestStatus::Failed,
                duration: 5,
                error: Some("timeout".to_string()),
            },
        ];

        let summary = TestSummary::of(&results);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.duration, 15);
        assert!(!summary.is_green());
    }
}
