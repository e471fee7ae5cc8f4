pub mod assertion;
pub mod common;
pub mod element;
pub mod enums;
pub mod error;
pub mod extraction;
pub mod parameterization;
pub mod result;
pub mod script;
pub mod suite;

pub use assertion::{
    Assertion, AssertionProjection, AssertionResult, AssertionResultConstants, MAX_MATCH_ITEM,
};
pub use common::{
    Arguments, Extensions, SampleResultConstants, TestTargetConstants, TimeLine, TimeUnit,
    TimeValue,
};
pub use element::{
    DEFAULT_TIMEOUT_IN_MS, PipelineElement, RendezvousElement, TargetBase, TargetProjection,
    TargetSampling, ThroughputElement, TransEndElement, TransStartElement, WaitingTimeElement,
};
pub use enums::{
    ActionOnEof, ActionWhenError, ApisCaseType, AssertionCondition, AssertionType,
    CaseTestMethod, ClientIn, ColumnType, ContentEncoding, ExtractionFileType, ExtractionMethod,
    ExtractionSource, FtpFileSource, FullMatchCondition, HttpExtractionLocation, HttpMethod,
    InputOutputType, Languages, LdapTestType, LineEndingType, MailProtocol, MatchParameterIn,
    ParameterIn, PipelineElementKind, QueryType, ResponseDelayMode, ScriptType, SecurityIn,
    SecurityType, SecurityUse, SharingMode, StartMode, StorageLocation, WebSocketMessageMode,
};
pub use error::{ScriptError, ScriptErrorKind, ScriptResult};
pub use extraction::{
    AnyExtraction, DefaultExtraction, Extraction, ExtractionOutcome, FileExtraction,
    HttpExtraction, HttpSamplingExtraction, JdbcExtraction,
};
pub use parameterization::{Dataset, DatasetParameter, Datasource, ValueProjection, Variable};
pub use result::{
    ProtocolSample, SampleExtensionResult, SampleFtpResult, SampleHttpResult, SampleJdbcResult,
    SampleLdapResult, SampleMailResult, SampleOutcome, SampleResult, SampleSmtpResult,
    SampleTcpResult, SampleWebSocketResult,
};
pub use script::{
    AngusScript, Configuration, Contact, Info, License, MAX_NODE_CPU_SPEC, MAX_NODE_TASK_NUM,
    NodeSelector, NodeSelectorStrategy, OnError, Setup, Task, TearDown, Threads,
};
pub use suite::{
    AngusMeterConfig, TestCase, TestCaseType, TestResult, TestStatus, TestSuite, TestSummary,
};
