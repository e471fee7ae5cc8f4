pub mod base;
pub mod entity;
pub mod response;

pub use base::{
    Id, KeyValuePair, ScalarValue, StringRecord, Timestamp, optional_scalar_text, scalar_text,
};
pub use entity::{BaseEntity, Config, Resource, ResourceStatus, User, UserRole};
pub use response::{
    ApiResponse, BaseResponse, ErrorResponse, ItemResponse, ListResponse, OperationStatus,
    PaginationInfo, ResponseMeta, SuccessResponse,
};
