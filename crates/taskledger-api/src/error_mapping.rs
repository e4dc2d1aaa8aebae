// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, ApiErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiErrorMapping {
    pub status_code: u16,
}

#[must_use]
pub fn map_error(error: &ApiError) -> ApiErrorMapping {
    let status_code = match error.code {
        ApiErrorCode::TaskNotFound | ApiErrorCode::UserNotFound => 404,
        ApiErrorCode::DuplicateId => 409,
        ApiErrorCode::IdMismatch | ApiErrorCode::ValidationFailed => 400,
        _ => 500,
    };

    ApiErrorMapping { status_code }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use taskledger_model::TaskId;

    #[test]
    fn status_codes_follow_the_error_taxonomy() {
        assert_eq!(map_error(&ApiError::task_not_found(TaskId::new(1))).status_code, 404);
        assert_eq!(map_error(&ApiError::duplicate_id(1)).status_code, 409);
        assert_eq!(map_error(&ApiError::id_mismatch(1, 2)).status_code, 400);
        assert_eq!(map_error(&ApiError::invalid_path_id("x", "not numeric")).status_code, 400);
        assert_eq!(map_error(&ApiError::storage("disk gone")).status_code, 500);
        assert_eq!(
            map_error(&ApiError::new(ApiErrorCode::Internal, "boom", json!({}))).status_code,
            500
        );
    }
}
