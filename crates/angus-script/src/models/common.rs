use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use serde_with::skip_serializing_none;

/// Opaque passthrough data attached to most shapes. Never interpreted here.
pub type Extensions = BTreeMap<String, Value>;

pub type Arguments = BTreeMap<String, Value>;

angus_sdk::literal_enum! {
    pub enum TimeUnit {
        Millis = "ms",
        Seconds = "s",
        Minutes = "m",
        Hours = "h",
        Days = "d",
    }
}

impl TimeUnit {
    pub fn millis(self) -> u64 {
        match self {
            Self::Millis => 1,
            Self::Seconds => 1_000,
            Self::Minutes => 60_000,
            Self::Hours => 3_600_000,
            Self::Days => 86_400_000,
        }
    }
}

/// Duration written as `{"value": 30, "unit": "s"}`. The value may be
/// fractional. The compact `"30s"` and `"1.5s"` forms are accepted on input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeValue {
    pub value: f64,
    pub unit: TimeUnit,
}

impl TimeValue {
    pub fn new(value: f64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    pub fn millis(value: u64) -> Self {
        Self::new(value as f64, TimeUnit::Millis)
    }

    pub fn seconds(value: u64) -> Self {
        Self::new(value as f64, TimeUnit::Seconds)
    }

    pub fn minutes(value: u64) -> Self {
        Self::new(value as f64, TimeUnit::Minutes)
    }

    /// `None` when the value is negative, not finite or out of range.
    pub fn as_duration(self) -> Option<Duration> {
        let seconds = self.value * self.unit.millis() as f64 / 1_000.0;
        Duration::try_from_secs_f64(seconds).ok()
    }

    /// Whole milliseconds, truncated.
    pub fn as_millis(self) -> Option<u64> {
        self.as_duration()
            .and_then(|duration| u64::try_from(duration.as_millis()).ok())
    }

    fn whole_value(self) -> Option<u64> {
        let whole = self.value >= 0.0 && self.value.fract() == 0.0 && self.value < u64::MAX as f64;
        whole.then_some(self.value as u64)
    }
}

impl Display for TimeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

impl std::str::FromStr for TimeValue {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let split = value
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .ok_or(())?;
        let (number, unit) = value.split_at(split);
        let number: f64 = number.parse().map_err(|_| ())?;
        if !number.is_finite() {
            return Err(());
        }
        Ok(Self::new(number, unit.trim().parse()?))
    }
}

impl Serialize for TimeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TimeValue", 2)?;
        match self.whole_value() {
            Some(whole) => state.serialize_field("value", &whole)?,
            None => state.serialize_field("value", &self.value)?,
        }
        state.serialize_field("unit", &self.unit)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for TimeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Structured { value: f64, unit: TimeUnit },
            Compact(String),
        }

        let time = match Raw::deserialize(deserializer)? {
            Raw::Structured { value, unit } => Self::new(value, unit),
            Raw::Compact(text) => text
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid time value '{text}'")))?,
        };
        if !time.value.is_finite() || time.value < 0.0 {
            return Err(D::Error::custom(format!("invalid time value '{time}'")));
        }
        Ok(time)
    }
}

#[skip_serializing_none]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeLine {
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub duration: Option<u64>,
    pub extensions: Option<Extensions>,
}

impl TimeLine {
    /// Elapsed milliseconds: `duration` when present, else end minus start.
    pub fn elapsed_millis(&self) -> Option<u64> {
        self.duration.or_else(|| match (self.start_time, self.end_time) {
            (Some(start), Some(end)) if end >= start => u64::try_from(end - start).ok(),
            _ => None,
        })
    }
}

pub struct TestTargetConstants;

impl TestTargetConstants {
    pub const TYPE_TARGET_HTTP: &'static str = "HTTP";
    pub const TYPE_TARGET_WEBSOCKET: &'static str = "WEBSOCKET";
    pub const TYPE_TARGET_JDBC: &'static str = "JDBC";
    pub const TYPE_TARGET_TCP: &'static str = "TCP";
    pub const TYPE_TARGET_SMTP: &'static str = "SMTP";
    pub const TYPE_TARGET_MAIL: &'static str = "MAIL";
    pub const TYPE_TARGET_FTP: &'static str = "FTP";
    pub const TYPE_TARGET_LDAP: &'static str = "LDAP";
    pub const TYPE_PIPELINE_RENDEZVOUS: &'static str = "RENDEZVOUS";
    pub const TYPE_PIPELINE_THROUGHPUT: &'static str = "THROUGHPUT";
    pub const TYPE_PIPELINE_TRANS_END: &'static str = "TRANS_END";
    pub const TYPE_PIPELINE_TRANS_START: &'static str = "TRANS_START";
    pub const TYPE_PIPELINE_WAITING_TIME: &'static str = "WAITING_TIME";
    pub const PLUGIN_HTTP_NAME: &'static str = "Http";
    pub const PLUGIN_WEBSOCKET_NAME: &'static str = "WebSocket";
    pub const PLUGIN_JDBC_NAME: &'static str = "Jdbc";
    pub const PLUGIN_TCP_NAME: &'static str = "Tcp";
    pub const PLUGIN_SMTP_NAME: &'static str = "Smtp";
    pub const PLUGIN_MAIL_NAME: &'static str = "Mail";
    pub const PLUGIN_FTP_NAME: &'static str = "Ftp";
    pub const PLUGIN_LDAP_NAME: &'static str = "Ldap";

    /// Plugin name for a protocol target tag.
    pub fn plugin_for(target: &str) -> Option<&'static str> {
        match target {
            Self::TYPE_TARGET_HTTP => Some(Self::PLUGIN_HTTP_NAME),
            Self::TYPE_TARGET_WEBSOCKET => Some(Self::PLUGIN_WEBSOCKET_NAME),
            Self::TYPE_TARGET_JDBC => Some(Self::PLUGIN_JDBC_NAME),
            Self::TYPE_TARGET_TCP => Some(Self::PLUGIN_TCP_NAME),
            Self::TYPE_TARGET_SMTP => Some(Self::PLUGIN_SMTP_NAME),
            Self::TYPE_TARGET_MAIL => Some(Self::PLUGIN_MAIL_NAME),
            Self::TYPE_TARGET_FTP => Some(Self::PLUGIN_FTP_NAME),
            Self::TYPE_TARGET_LDAP => Some(Self::PLUGIN_LDAP_NAME),
            _ => None,
        }
    }
}

pub struct SampleResultConstants;

impl SampleResultConstants {
    pub const TYPE_TARGET_HTTP: &'static str = "HTTP";
    pub const TYPE_TARGET_WEBSOCKET: &'static str = "WEBSOCKET";
    pub const TYPE_TARGET_JDBC: &'static str = "JDBC";
    pub const TYPE_TARGET_TCP: &'static str = "TCP";
    pub const TYPE_TARGET_SMTP: &'static str = "SMTP";
    pub const TYPE_TARGET_MAIL: &'static str = "MAIL";
    pub const TYPE_TARGET_FTP: &'static str = "FTP";
    pub const TYPE_TARGET_LDAP: &'static str = "LDAP";
    pub const TYPE_TARGET_EXTENSION: &'static str = "EXTENSION";
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn time_values_accept_object_and_compact_forms() {
        let structured: TimeValue = serde_json::from_value(json!({"value": 30, "unit": "s"})).unwrap();
        let compact: TimeValue = serde_json::from_value(json!("30s")).unwrap();

        assert_eq!(structured, compact);
        assert_eq!(structured.as_duration(), Some(Duration::from_secs(30)));
        assert_eq!(
            serde_json::to_value(compact).unwrap(),
            json!({"value": 30, "unit": "s"})
        );
    }

    #[test]
    fn time_value_parsing_rejects_unknown_units() {
        assert_eq!("500ms".parse::<TimeValue>(), Ok(TimeValue::millis(500)));
        assert_eq!("2 h".parse::<TimeValue>(), Ok(TimeValue::new(2.0, TimeUnit::Hours)));
        assert!("10w".parse::<TimeValue>().is_err());
        assert!("ms".parse::<TimeValue>().is_err());
        assert!("15".parse::<TimeValue>().is_err());
        assert_eq!(TimeValue::minutes(5).to_string(), "5m");
    }

    #[test]
    fn time_values_may_be_fractional() {
        let structured: TimeValue =
            serde_json::from_value(json!({"value": 1.5, "unit": "s"})).unwrap();
        let compact: TimeValue = serde_json::from_value(json!("1.5s")).unwrap();

        assert_eq!(structured, compact);
        assert_eq!(structured.as_millis(), Some(1_500));
        assert_eq!(structured.as_duration(), Some(Duration::from_millis(1_500)));
        assert_eq!(structured.to_string(), "1.5s");
        assert_eq!(
            serde_json::to_value(structured).unwrap(),
            json!({"value": 1.5, "unit": "s"})
        );
        assert_eq!("0.25m".parse::<TimeValue>().map(TimeValue::as_millis), Ok(Some(15_000)));
    }

    #[test]
    fn negative_time_values_are_rejected() {
        assert!(serde_json::from_value::<TimeValue>(json!({"value": -1, "unit": "s"})).is_err());
        assert_eq!(TimeValue::new(-1.0, TimeUnit::Seconds).as_duration(), None);
        assert_eq!(TimeValue::new(f64::MAX, TimeUnit::Days).as_millis(), None);
    }

    #[test]
    fn timeline_prefers_explicit_duration() {
        let derived = TimeLine {
            start_time: Some(1_000),
            end_time: Some(1_250),
            ..TimeLine::default()
        };
        assert_eq!(derived.elapsed_millis(), Some(250));

        let explicit = TimeLine {
            duration: Some(7),
            ..derived.clone()
        };
        assert_eq!(explicit.elapsed_millis(), Some(7));
    }

    #[test]
    fn plugin_names_follow_target_tags() {
        assert_eq!(TestTargetConstants::plugin_for("WEBSOCKET"), Some("WebSocket"));
        assert_eq!(TestTargetConstants::plugin_for("RENDEZVOUS"), None);
    }
}
