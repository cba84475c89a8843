use serde::{Deserialize, Serialize};

/// Function name used when none is configured.
pub const DEFAULT_FUNCTION_NAME: &str = "woofy-handler";

/// Simulated Lambda invocation context.
///
/// Carries the identifiers a real invocation would log with; the classifier uses them
/// only for log correlation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationContext {
    pub function_name: String,
    pub request_id: String,
    pub aws_request_id: String,
    pub log_group_name: String,
}

impl InvocationContext {
    /// Fresh context with random request ids and the conventional log group.
    pub fn new(function_name: &str) -> Self {
        Self {
            function_name: function_name.to_string(),
            request_id: uuid::Uuid::new_v4().to_string(),
            aws_request_id: uuid::Uuid::new_v4().to_string(),
            log_group_name: format!("/aws/lambda/{function_name}"),
        }
    }

    /// Function name from `WOOFY_FUNCTION_NAME`, falling back to the default.
    pub fn function_name_from_env() -> String {
        std::env::var("WOOFY_FUNCTION_NAME")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_FUNCTION_NAME.to_string())
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new(DEFAULT_FUNCTION_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_group_follows_function_name() {
        let ctx = InvocationContext::new("woofy-handler");
        assert_eq!(ctx.log_group_name, "/aws/lambda/woofy-handler");
        assert_ne!(ctx.request_id, ctx.aws_request_id);
        assert!(uuid::Uuid::parse_str(&ctx.request_id).is_ok());
    }
}
