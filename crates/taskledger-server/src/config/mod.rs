use serde::Serialize;

pub const CONFIG_SCHEMA_VERSION: &str = "1";

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    /// When set, POST /tasks overwrites an occupied id instead of rejecting
    /// it. The duplicate-id policy lives at this boundary, not in the store.
    pub create_overwrite: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 16 * 1024,
            create_overwrite: false,
        }
    }
}

pub fn validate_startup_config(api: &ApiConfig) -> Result<(), String> {
    if api.max_body_bytes == 0 {
        return Err("max_body_bytes must be > 0".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_config_validation_rejects_zero_body_limit() {
        let api = ApiConfig {
            max_body_bytes: 0,
            ..ApiConfig::default()
        };
        let err = validate_startup_config(&api).expect_err("zero body limit");
        assert!(err.contains("max_body_bytes"));
    }

    #[test]
    fn default_config_passes_validation() {
        validate_startup_config(&ApiConfig::default()).expect("default config");
    }
}
