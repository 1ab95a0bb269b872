//! Result type alias for configuration loading

use super::errors::ConfigError;

/// Result type alias for fallible configuration operations
///
/// # Examples
///
/// ```
/// use rancher_config::domain::result::Result;
/// use rancher_config::domain::errors::ConfigError;
///
/// fn failing_function() -> Result<()> {
///     Err(ConfigError::Serialization("cannot encode".to_string()))
/// }
///
/// assert!(failing_function().is_err());
/// ```
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
