pub mod ftp;
pub mod http;
pub mod jdbc;
pub mod ldap;
pub mod mail;
pub mod smtp;
pub mod tcp;
pub mod websocket;

pub use ftp::{Ftp, FtpRequest0, FtpResponse, FtpServer};
pub use http::{
    ApiKey, FormParameter, Http, HttpSetting, OAuth2Flow, OAuth2Flows, Parameter, PostRequest,
    Request, Request0, RequestBody, Response, Security, Server, ServerVariable,
};
pub use jdbc::{Jdbc, JdbcArgument, JdbcRequest0, JdbcResponse};
pub use ldap::{Ldap, LdapRequest0, LdapResponse, LdapServer};
pub use mail::{
    Mail, MailBoxSetting, MailRequest0, MailResponse, MailResponses, MailServer,
    MailServerSecurity,
};
pub use smtp::{Smtp, SmtpMail, SmtpMailContent, SmtpResponse};
pub use tcp::{Tcp, TcpRequest0, TcpResponse, TcpServer, TcpSetting};
pub use websocket::{WebSocket, WebSocketRequest0, WebSocketResponse, WebSocketSetting};
