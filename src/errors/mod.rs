use anyhow::Context as _;
use thiserror::Error;

/// Conditions that stop a ranking run before it starts
#[derive(Debug, Error, PartialEq)]
pub enum RankingError {
    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    #[error("Override divisor for '{item}' must be finite and nonzero, got {divisor}")]
    InvalidOverride { item: String, divisor: f64 },
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to file system errors
pub fn io_context(operation: &str, path: &std::path::Path) -> String {
    format!("Failed to {} {}", operation, path.display())
}

/// Wrap result with parse context
pub fn with_parse_context<T, E>(result: Result<T, E>, data_type: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(parse_context(data_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_context_wraps_source() {
        let result: Result<f64, _> = "abc".parse::<f64>();
        let err = with_parse_context(result, "rating").unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse rating");
    }

    #[test]
    fn test_missing_input_message() {
        let err = RankingError::MissingInput("reference ratings");
        assert_eq!(err.to_string(), "Missing required input: reference ratings");
    }
}
