//! Result type alias for cafetch

use super::errors::CafetchError;

/// Result type alias for cafetch operations
///
/// # Examples
///
/// ```
/// use cafetch::domain::result::Result;
/// use cafetch::domain::errors::CafetchError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(CafetchError::Protocol("missing data.search".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CafetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<u64> {
            Ok(237)
        }

        let value = inner()?;
        assert_eq!(value, 237);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<u64> = Err(CafetchError::Request("refused".to_string()));
        assert!(result.is_err());
    }
}
