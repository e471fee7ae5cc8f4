use angus_sdk::literal_enum;

literal_enum! {
    pub enum ScriptType {
        TestFunctionality = "TEST_FUNCTIONALITY",
        TestPerformance = "TEST_PERFORMANCE",
        TestStability = "TEST_STABILITY",
        TestCustomization = "TEST_CUSTOMIZATION",
        MockData = "MOCK_DATA",
        MockApis = "MOCK_APIS",
    }
}

impl ScriptType {
    pub fn is_test(self) -> bool {
        matches!(
            self,
            Self::TestFunctionality
                | Self::TestPerformance
                | Self::TestStability
                | Self::TestCustomization
        )
    }

    pub fn is_mock(self) -> bool {
        matches!(self, Self::MockData | Self::MockApis)
    }
}

literal_enum! {
    pub enum ActionWhenError {
        Continue = "CONTINUE",
        Stop = "STOP",
        StopNow = "STOP_NOW",
    }
}

literal_enum! {
    pub enum StartMode {
        Immediately = "IMMEDIATELY",
        Timing = "TIMING",
    }
}

literal_enum! {
    pub enum Languages {
        ZhCn = "zh_CN",
        EnUs = "en_US",
    }
}

literal_enum! {
    pub enum ExtractionMethod {
        ExactValue = "EXACT_VALUE",
        Regex = "REGEX",
        JsonPath = "JSON_PATH",
        XPath = "X_PATH",
    }
}

literal_enum! {
    pub enum ExtractionSource {
        Value = "VALUE",
        File = "FILE",
        Http = "HTTP",
        HttpSampling = "HTTP_SAMPLING",
        HttpAssertion = "HTTP_ASSERTION",
        Jdbc = "JDBC",
    }
}

literal_enum! {
    pub enum ExtractionFileType {
        Csv = "CSV",
        Excel = "EXCEL",
    }
}

literal_enum! {
    pub enum HttpExtractionLocation {
        QueryParameter = "QUERY_PARAMETER",
        PathParameter = "PATH_PARAMETER",
        RequestHeader = "REQUEST_HEADER",
        FormParameter = "FORM_PARAMETER",
        RequestRawBody = "REQUEST_RAW_BODY",
        ResponseHeader = "RESPONSE_HEADER",
        ResponseBody = "RESPONSE_BODY",
    }
}

impl HttpExtractionLocation {
    pub fn is_request_side(self) -> bool {
        !matches!(self, Self::ResponseHeader | Self::ResponseBody)
    }
}

literal_enum! {
    pub enum HttpMethod {
        Get = "GET",
        Post = "POST",
        Put = "PUT",
        Delete = "DELETE",
        Patch = "PATCH",
        Head = "HEAD",
        Options = "OPTIONS",
        Trace = "TRACE",
    }
}

literal_enum! {
    pub enum ParameterIn {
        Query = "QUERY",
        Path = "PATH",
        Header = "HEADER",
        Cookie = "COOKIE",
    }
}

literal_enum! {
    #[derive(Default)]
    pub enum SecurityType {
        #[default]
        None = "none",
        Http = "http",
        ApiKey = "apiKey",
        Oauth2 = "oauth2",
        Extension = "extension",
    }
}

literal_enum! {
    #[derive(Default)]
    pub enum SecurityIn {
        #[default]
        Header = "HEADER",
        Query = "QUERY",
        Cookie = "COOKIE",
    }
}

literal_enum! {
    pub enum ClientIn {
        QueryParameter = "QUERY_PARAMETER",
        BasicAuthHeader = "BASIC_AUTH_HEADER",
        RequestBody = "REQUEST_BODY",
    }
}

literal_enum! {
    pub enum ApisCaseType {
        Functional = "FUNCTIONAL",
        Performance = "PERFORMANCE",
        Stress = "STRESS",
        Load = "LOAD",
    }
}

literal_enum! {
    pub enum CaseTestMethod {
        Manual = "MANUAL",
        Automatic = "AUTOMATIC",
        SemiAutomatic = "SEMI_AUTOMATIC",
    }
}

literal_enum! {
    /// What happens when a dataset runs out of rows.
    #[derive(Default)]
    pub enum ActionOnEof {
        Stop = "STOP",
        #[default]
        Recycle = "RECYCLE",
    }
}

literal_enum! {
    #[derive(Default)]
    pub enum SharingMode {
        #[default]
        AllThread = "ALL_THREAD",
        CurrentThread = "CURRENT_THREAD",
    }
}

literal_enum! {
    pub enum PipelineElementKind {
        Target = "TARGET",
        Rendezvous = "RENDEZVOUS",
        Throughput = "THROUGHPUT",
        StartTransaction = "START_TRANSACTION",
        EndTransaction = "END_TRANSACTION",
        WaitingTime = "WAITING_TIME",
    }
}

literal_enum! {
    pub enum QueryType {
        Select = "SELECT",
        Update = "UPDATE",
        Callable = "CALLABLE",
        PreparedSelect = "PREPARED_SELECT",
        PreparedUpdate = "PREPARED_UPDATE",
    }
}

impl QueryType {
    pub fn takes_arguments(self) -> bool {
        matches!(
            self,
            Self::Callable | Self::PreparedSelect | Self::PreparedUpdate
        )
    }

    pub fn is_select(self) -> bool {
        matches!(self, Self::Select | Self::PreparedSelect)
    }
}

literal_enum! {
    pub enum InputOutputType {
        In = "IN",
        Out = "OUT",
        Inout = "INOUT",
    }
}

literal_enum! {
    #[derive(Default)]
    pub enum ColumnType {
        #[default]
        Varchar = "VARCHAR",
        Integer = "INTEGER",
        Bigint = "BIGINT",
        Decimal = "DECIMAL",
        Float = "FLOAT",
        Double = "DOUBLE",
        Boolean = "BOOLEAN",
        Date = "DATE",
        Time = "TIME",
        Timestamp = "TIMESTAMP",
        Blob = "BLOB",
        Clob = "CLOB",
    }
}

literal_enum! {
    pub enum AssertionType {
        Status = "STATUS",
        Header = "HEADER",
        Body = "BODY",
        BodySize = "BODY_SIZE",
        Size = "SIZE",
        Duration = "DURATION",
    }
}

impl AssertionType {
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Status | Self::BodySize | Self::Size | Self::Duration)
    }
}

literal_enum! {
    pub enum AssertionCondition {
        Equal = "EQUAL",
        NotEqual = "NOT_EQUAL",
        IsEmpty = "IS_EMPTY",
        NotEmpty = "NOT_EMPTY",
        IsNull = "IS_NULL",
        NotNull = "NOT_NULL",
        GreaterThan = "GREATER_THAN",
        GreaterThanEqual = "GREATER_THAN_EQUAL",
        LessThan = "LESS_THAN",
        LessThanEqual = "LESS_THAN_EQUAL",
        Contain = "CONTAIN",
        NotContain = "NOT_CONTAIN",
        RegMatch = "REG_MATCH",
        XpathMatch = "XPATH_MATCH",
        JsonPathMatch = "JSON_PATH_MATCH",
    }
}

impl AssertionCondition {
    /// Emptiness and nullity checks compare against nothing.
    pub fn needs_expected(self) -> bool {
        !matches!(
            self,
            Self::IsEmpty | Self::NotEmpty | Self::IsNull | Self::NotNull
        )
    }

    pub fn needs_expression(self) -> bool {
        matches!(self, Self::RegMatch | Self::XpathMatch | Self::JsonPathMatch)
    }

    pub fn is_numeric_comparison(self) -> bool {
        matches!(
            self,
            Self::GreaterThan | Self::GreaterThanEqual | Self::LessThan | Self::LessThanEqual
        )
    }
}

/// Mock API match rules share the assertion condition vocabulary.
pub type FullMatchCondition = AssertionCondition;

literal_enum! {
    pub enum FtpFileSource {
        RemoteFile = "REMOTE_FILE",
        RemoteUrl = "REMOTE_URL",
        LocalFile = "LOCAL_FILE",
    }
}

literal_enum! {
    pub enum LdapTestType {
        Add = "ADD",
        Modify = "MODIFY",
        Delete = "DELETE",
        Search = "SEARCH",
    }
}

literal_enum! {
    pub enum MailProtocol {
        Pop3 = "POP3",
        Imap = "IMAP",
    }
}

literal_enum! {
    #[derive(Default)]
    pub enum SecurityUse {
        #[default]
        None = "NONE",
        Ssl = "SSL",
        Starttls = "STARTTLS",
    }
}

literal_enum! {
    #[derive(Default)]
    pub enum WebSocketMessageMode {
        OnlySend = "ONLY_SEND",
        OnlyReceive = "ONLY_RECEIVE",
        #[default]
        SendAndReceive = "SEND_AND_RECEIVE",
    }
}

impl WebSocketMessageMode {
    pub fn sends(self) -> bool {
        !matches!(self, Self::OnlyReceive)
    }

    pub fn receives(self) -> bool {
        !matches!(self, Self::OnlySend)
    }
}

literal_enum! {
    pub enum MatchParameterIn {
        Query = "query",
        Header = "header",
    }
}

literal_enum! {
    #[derive(Default)]
    pub enum ResponseDelayMode {
        #[default]
        None = "NONE",
        Fixed = "FIXED",
        Random = "RANDOM",
    }
}

literal_enum! {
    pub enum StorageLocation {
        Dataspace = "DATASPACE",
        Datasource = "DATASOURCE",
        Local = "LOCAL",
        PushThird = "PUSH_THIRD",
    }
}

literal_enum! {
    pub enum LineEndingType {
        UnitLf = "UNIT_LF",
        WindowsCrlf = "WINDOWS_CRLF",
    }
}

impl LineEndingType {
    pub fn separator(self) -> &'static str {
        match self {
            Self::UnitLf => "\n",
            Self::WindowsCrlf => "\r\n",
        }
    }
}

literal_enum! {
    pub enum ContentEncoding {
        None = "none",
        Base64 = "base64",
        GzipBase64 = "gzip_base64",
    }
}
