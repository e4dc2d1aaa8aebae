#![forbid(unsafe_code)]
//! Wire contract of the taskledger HTTP surface: request/response DTOs,
//! the machine-readable error envelope, and the error-to-status mapping.

mod convert;
mod dto;
mod error_mapping;
mod errors;

pub use dto::{
    CreateTaskDto, CreateUserDto, DeletedTaskDto, DeletedUserDto, PatchTaskDto, PatchUserDto,
    TaskDto, UserDto,
};
pub use error_mapping::{map_error, ApiErrorMapping};
pub use errors::{ApiError, ApiErrorCode};

pub const CRATE_NAME: &str = "taskledger-api";
pub const API_VERSION: &str = "v1";
