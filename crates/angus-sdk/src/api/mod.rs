pub mod client;
pub mod endpoints;
pub mod request;

pub use client::{
    AuthConfig, AuthType, ClientConfig, ClientEvent, ClientEventType, ClientSession,
    InterceptorChain, RequestInterceptor, ResponseInterceptor, RetryConfig, TokenRefresher,
};
pub use endpoints::{
    EndpointConfig, EndpointParams, EndpointResponse, EndpointRetry, RateLimit, ResourceEndpoint,
};
pub use request::{
    ApiRequest, BaseRequest, BodyRequest, HttpMethod, HttpStatus, PathRequest, RequestOptions,
    RequestPriority, RequestRetryConfig,
};
