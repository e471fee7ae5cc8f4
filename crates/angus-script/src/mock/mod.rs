pub mod apis;
pub mod data;

pub use apis::{
    MatchBody, MatchParameter, MatchPath, MatchRequest, MockApis, MockHeader, MockResponse,
    MockResponseContent, MockResponsePushback, ResponseDelay,
};
pub use data::{
    CsvSetting, CustomSetting, ExcelSetting, ExtSetting, JsonSetting, MockData, MockField,
    MockSetting, MockSettingBase, SqlSetting, TabSetting, XmlSetting,
};
