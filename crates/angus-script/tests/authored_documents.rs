use angus_script::document::{self, ScriptFormat};
use angus_script::mock::MockSetting;
use angus_script::models::{
    AngusScript, AssertionType, Extraction, ExtractionSource, LdapTestType, PipelineElement,
    PipelineElementKind, QueryType, WebSocketMessageMode,
};

const CATALOG_JSON: &str = r#"{
  "specification": "angus/1.0.0",
  "type": "TEST_PERFORMANCE",
  "plugin": "http",
  "configuration": {
    "threads": {
      "max": 10,
      "min": 1,
      "step": 1,
      "stepTime": {"value": 1, "unit": "s"},
      "holdTime": {"value": 30, "unit": "s"}
    },
    "onError": {"action": "CONTINUE", "sampleError": true, "sampleErrorNum": 20},
    "variables": [
      {
        "name": "apiUrl",
        "description": "API base url",
        "value": "https://api.example.com",
        "passwordValue": false,
        "extraction": {
          "name": "tokenExtraction",
          "method": "REGEX",
          "source": "VALUE",
          "expression": "token=([^&]+)",
          "matchItem": 0,
          "defaultValue": "default-token"
        }
      },
      {
        "name": "userToken",
        "passwordValue": true,
        "extraction": {
          "name": "csvExtraction",
          "method": "EXACT_VALUE",
          "source": "FILE",
          "fileType": "CSV",
          "path": "/data/users.csv",
          "encoding": "UTF-8",
          "quoteChar": "\"",
          "escapeChar": "\\",
          "separatorChar": ",",
          "rowIndex": 1,
          "columnIndex": 0
        }
      },
      {
        "name": "dbConfig",
        "passwordValue": true,
        "extraction": {
          "name": "dbExtraction",
          "method": "EXACT_VALUE",
          "source": "JDBC",
          "datasource": {
            "name": "testDB",
            "url": "jdbc:mysql://localhost:3306/test",
            "config": {"username": "user", "driverClassName": "com.mysql.cj.jdbc.Driver"}
          },
          "select": "SELECT token FROM users WHERE id = ?",
          "rowIndex": 0,
          "columnIndex": 0
        }
      }
    ]
  },
  "task": {
    "arguments": {"http.setting": {"connectTimeout": 5000, "readTimeout": 10000}},
    "setup": {"name": "setup", "script": "console.log('start')"},
    "pipelines": [
      {
        "target": "HTTP",
        "name": "api-test",
        "enabled": true,
        "condition": "${env} == \"test\"",
        "beforeName": "login-test",
        "transactionName": "user-transaction",
        "apisId": 12345,
        "caseId": 67890,
        "caseType": "FUNCTIONAL",
        "caseTestMethod": "AUTOMATIC",
        "request": {
          "method": "POST",
          "url": "https://api.example.com/users",
          "server": {"url": "https://api.example.com", "description": "API server"},
          "endpoint": "/users",
          "authentication": {"type": "http", "scheme": "Bearer"},
          "parameters": [
            {"name": "page", "value": "1", "in": "QUERY", "required": false}
          ],
          "contentType": "application/json",
          "body": {
            "format": "json",
            "contentEncoding": "utf-8",
            "rawContent": "{\"name\": \"John Doe\"}"
          },
          "setting": {
            "connectTimeout": 5000,
            "readTimeout": 10000,
            "writeTimeout": 5000,
            "followRedirects": true,
            "maxRedirects": 3
          }
        },
        "response": {
          "statusCode": 200,
          "headers": {"Content-Type": "application/json"},
          "body": "{\"success\": true}",
          "responseTime": 150,
          "size": 1024,
          "encoding": "UTF-8",
          "contentType": "application/json"
        },
        "assertions": [
          {"name": "status-assertion", "enabled": true, "type": "STATUS",
           "assertionCondition": "EQUAL", "expected": "200"},
          {"name": "body-assertion", "type": "BODY", "assertionCondition": "CONTAIN",
           "expression": "$.data.message", "expected": "success"},
          {"name": "header-assertion", "type": "HEADER", "parameterName": "Content-Type",
           "assertionCondition": "EQUAL", "expected": "application/json"},
          {"name": "duration-assertion", "type": "DURATION",
           "assertionCondition": "LESS_THAN", "expected": "1000"}
        ],
        "variables": [],
        "datasets": [
          {
            "name": "user-dataset",
            "parameters": [
              {"name": "userId", "value": "123"},
              {"name": "username", "value": "john_doe"},
              {"name": "email", "value": "john@example.com"},
              {"name": "status", "value": "active"}
            ],
            "extraction": {
              "name": "userExtraction",
              "method": "JSON_PATH",
              "source": "JDBC",
              "expression": "$.data[*]"
            }
          }
        ],
        "actionOnEOF": "RECYCLE",
        "sharingMode": "ALL_THREAD"
      },
      {
        "target": "JDBC",
        "name": "db-test",
        "type": "SELECT",
        "sql": "SELECT * FROM users WHERE id = ? AND status = ?",
        "maxResultRows": 1000,
        "timeoutInSecond": 30,
        "arguments": [
          {"type": "INTEGER", "inout": "IN", "value": "123"},
          {"type": "VARCHAR", "inout": "IN", "value": "active"}
        ],
        "response": {
          "success": true,
          "updateCount": 0,
          "rows": [{"id": 123, "name": "John Doe", "status": "active"}],
          "columnLabels": ["id", "name", "status"],
          "timeline": {"startTime": 1640995200000, "endTime": 1640995201000, "duration": 1000}
        }
      },
      {
        "target": "FTP",
        "name": "ftp-download-test",
        "server": {
          "server": "ftp.example.com",
          "port": 21,
          "username": "ftpuser",
          "password": "ftppass",
          "readTimeout": {"value": 60, "unit": "s"},
          "connectTimeout": {"value": 6, "unit": "s"}
        },
        "uploadFile": false,
        "uploadFileSource": "REMOTE_FILE",
        "remoteFileName": "test-file.txt",
        "localFileName": "downloaded-file.txt",
        "binaryMode": false
      },
      {
        "target": "LDAP",
        "name": "ldap-search-test",
        "server": {
          "server": "ldap.example.com",
          "port": 389,
          "username": "cn=admin,dc=example,dc=com",
          "password": "adminpass",
          "rootDn": "dc=example,dc=com"
        },
        "testType": "SEARCH",
        "userDefined": false,
        "searchBase": "ou=users,dc=example,dc=com",
        "searchFilter": "(objectClass=person)"
      },
      {
        "target": "SMTP",
        "name": "simple-smtp-test",
        "server": {
          "server": "smtp.gmail.com",
          "port": 587,
          "security": {"use": "STARTTLS"},
          "useAuth": true,
          "username": "user@gmail.com",
          "password": "apppassword"
        },
        "mail": {
          "mailFrom": "user@gmail.com",
          "receiverTo": "recipient@gmail.com",
          "receiverCC": "cc@example.com",
          "content": {"subject": "Simple test", "message": "Hello", "plainBody": true}
        }
      },
      {
        "target": "TCP",
        "name": "binary-tcp-test",
        "server": {
          "server": "binary.example.com",
          "port": 9090,
          "connectTimeout": {"value": 10, "unit": "s"},
          "responseTimeout": {"value": 30, "unit": "s"}
        },
        "data": "SGVsbG8sIEJpbmFyeSBUQ1AgU2VydmVyIQ==",
        "dataEncoding": "base64",
        "setting": {
          "tcpClientImplClass": "BinaryTcpClientImpl",
          "reUseConnection": true,
          "setNoDelay": true,
          "soLinger": -1,
          "eomByte": 0,
          "binaryPrefixLength": 4
        }
      },
      {
        "target": "WEBSOCKET",
        "name": "websocket-test",
        "url": "ws://websocket.example.com/chat",
        "parameters": [
          {"name": "token", "in": "QUERY", "value": "${authToken}"},
          {"name": "userId", "in": "QUERY", "value": "12345"}
        ],
        "mode": "SEND_AND_RECEIVE",
        "message": "{\"type\": \"message\"}",
        "messageEncoding": "none",
        "assertions": [],
        "datasets": [],
        "setting": {
          "connectTimeout": {"value": 6, "unit": "s"},
          "responseTimeout": {"value": 60, "unit": "s"},
          "maxReconnections": 3,
          "reconnectionInterval": {"value": 200, "unit": "ms"}
        }
      },
      {
        "target": "RENDEZVOUS",
        "name": "login-rendezvous",
        "transactionName": "user-login-transaction",
        "threads": 100,
        "timeoutInMs": 30000
      },
      {
        "target": "THROUGHPUT",
        "name": "api-throughput",
        "permitsPerSecond": 50,
        "timeoutInMs": 60000
      },
      {
        "target": "WAITING_TIME",
        "name": "think-time",
        "minWaitTimeInMs": 1000,
        "maxWaitTimeInMs": 5000
      }
    ],
    "mockData": {
      "name": "test-data",
      "fields": [
        {"name": "id", "type": "string", "value": "{{random.uuid}}"},
        {"name": "name", "type": "string", "value": "{{name.firstName}}"}
      ],
      "settings": {
        "format": "JSON",
        "rows": 100,
        "batchRows": 50,
        "location": "DATASPACE",
        "lineEnding": "UNIT_LF",
        "includeNull": false,
        "rowsToArray": true
      }
    },
    "mockApis": [
      {"name": "mock-api", "method": "GET", "endpoint": "/api/test", "responses": []}
    ],
    "tearDown": {"name": "cleanup", "script": "console.log('done')"}
  }
}"#;

fn load_catalog() -> AngusScript {
    document::from_str(CATALOG_JSON, ScriptFormat::Json).unwrap()
}

#[test]
fn json_catalog_decodes_every_pipeline_element() {
    let script = load_catalog();

    let targets: Vec<&str> = script.pipelines().iter().map(PipelineElement::target).collect();
    assert_eq!(
        targets,
        vec![
            "HTTP",
            "JDBC",
            "FTP",
            "LDAP",
            "SMTP",
            "TCP",
            "WEBSOCKET",
            "RENDEZVOUS",
            "THROUGHPUT",
            "WAITING_TIME"
        ]
    );
    assert_eq!(
        script.pipelines().iter().filter(|element| element.is_target()).count(),
        7
    );
    assert_eq!(script.pipelines()[9].kind(), PipelineElementKind::WaitingTime);

    let PipelineElement::Http(http) = &script.pipelines()[0] else {
        panic!("expected an HTTP target first");
    };
    assert_eq!(http.apis_id, Some(12345));
    assert!(http.has_status_assertion());
    let types: Vec<AssertionType> = http
        .sampling
        .assertions()
        .iter()
        .map(|assertion| assertion.assertion_type)
        .collect();
    assert_eq!(
        types,
        vec![
            AssertionType::Status,
            AssertionType::Body,
            AssertionType::Header,
            AssertionType::Duration
        ]
    );
    let dataset = &http.sampling.datasets()[0];
    assert_eq!(
        dataset.parameter_names().collect::<Vec<_>>(),
        vec!["userId", "username", "email", "status"]
    );
    assert_eq!(
        dataset.extraction.as_ref().map(|extraction| extraction.source()),
        Some(ExtractionSource::Jdbc)
    );
    assert_eq!(
        http.response.as_ref().and_then(|response| response.header("content-type")),
        Some("application/json")
    );

    let PipelineElement::Jdbc(jdbc) = &script.pipelines()[1] else {
        panic!("expected a JDBC target second");
    };
    assert_eq!(jdbc.query_type, QueryType::Select);
    assert_eq!(
        jdbc.response.as_ref().and_then(|response| response.cell(0, 1)),
        Some(&serde_json::json!("John Doe"))
    );

    let PipelineElement::Ftp(ftp) = &script.pipelines()[2] else {
        panic!("expected an FTP target third");
    };
    assert!(ftp.missing_fields().is_empty());

    let PipelineElement::Ldap(ldap) = &script.pipelines()[3] else {
        panic!("expected an LDAP target fourth");
    };
    assert_eq!(ldap.test_type, LdapTestType::Search);

    let PipelineElement::Smtp(smtp) = &script.pipelines()[4] else {
        panic!("expected an SMTP target fifth");
    };
    assert_eq!(smtp.mail.receiver_cc.as_deref(), Some("cc@example.com"));

    let PipelineElement::WebSocket(websocket) = &script.pipelines()[6] else {
        panic!("expected a WebSocket target seventh");
    };
    assert_eq!(websocket.mode, WebSocketMessageMode::SendAndReceive);
}

#[test]
fn json_catalog_keeps_variables_and_mock_sections() {
    let script = load_catalog();
    let configuration = script.configuration.as_ref().unwrap();

    let sources: Vec<ExtractionSource> = configuration
        .variables
        .iter()
        .flatten()
        .filter_map(|variable| variable.extraction.as_ref())
        .map(|extraction| extraction.source())
        .collect();
    assert_eq!(
        sources,
        vec![ExtractionSource::Value, ExtractionSource::File, ExtractionSource::Jdbc]
    );

    let api_url = configuration.variable("apiUrl").unwrap();
    assert_eq!(
        api_url.extraction.as_ref().and_then(|e| e.base().default_value.as_deref()),
        Some("default-token")
    );
    assert!(configuration.variable("userToken").unwrap().is_sensitive());

    let task = script.task.as_ref().unwrap();
    let settings = &task.mock_data.as_ref().unwrap().settings;
    assert!(matches!(settings, MockSetting::Json(json) if json.rows_to_array));
    assert_eq!(settings.base().batch_rows, 50);
    assert!(task.mock_apis.as_ref().unwrap()[0].responses.is_empty());
}

#[test]
fn json_catalog_survives_a_yaml_round_trip() {
    let script = load_catalog();

    let yaml = document::to_string(&script, ScriptFormat::Yaml).unwrap();
    let from_yaml = document::from_str(&yaml, ScriptFormat::Yaml).unwrap();
    assert_eq!(from_yaml, script);

    let json = document::to_string(&from_yaml, ScriptFormat::Json).unwrap();
    assert_eq!(document::from_str(&json, ScriptFormat::Json).unwrap(), script);
}

#[test]
fn hand_written_yaml_matches_the_json_form() {
    let yaml = r#"
type: TEST_PERFORMANCE
task:
  pipelines:
    - target: HTTP
      name: api-test
      request:
        method: POST
        url: https://api.example.com/users
        parameters:
          - name: page
            in: QUERY
            value: 1
      assertions:
        - name: status-assertion
          type: STATUS
          assertionCondition: EQUAL
          expected: 200
        - name: duration-assertion
          type: DURATION
          assertionCondition: LESS_THAN
          expected: 1000
      datasets:
        - name: user-dataset
          parameters:
            - name: userId
              value: 123
    - target: WAITING_TIME
      name: think-time
      minWaitTimeInMs: 1000
      maxWaitTimeInMs: 5000
"#;
    let json = r#"{
      "type": "TEST_PERFORMANCE",
      "task": {
        "pipelines": [
          {
            "target": "HTTP",
            "name": "api-test",
            "request": {
              "method": "POST",
              "url": "https://api.example.com/users",
              "parameters": [{"name": "page", "in": "QUERY", "value": "1"}]
            },
            "assertions": [
              {"name": "status-assertion", "type": "STATUS",
               "assertionCondition": "EQUAL", "expected": "200"},
              {"name": "duration-assertion", "type": "DURATION",
               "assertionCondition": "LESS_THAN", "expected": 1000}
            ],
            "datasets": [
              {"name": "user-dataset", "parameters": [{"name": "userId", "value": 123}]}
            ]
          },
          {
            "target": "WAITING_TIME",
            "name": "think-time",
            "minWaitTimeInMs": 1000,
            "maxWaitTimeInMs": 5000
          }
        ]
      }
    }"#;

    let from_yaml = document::from_str(yaml, ScriptFormat::Yaml).unwrap();
    let from_json = document::from_str(json, ScriptFormat::Json).unwrap();
    assert_eq!(from_yaml, from_json);
    assert!(from_yaml.check().valid);
}
