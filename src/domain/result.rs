//! Result type alias for Roster

use super::errors::RosterError;

/// Result type alias for Roster operations
///
/// # Examples
///
/// ```
/// use roster::domain::result::Result;
/// use roster::domain::errors::RosterError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(RosterError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, RosterError>;

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

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(RosterError::NotFound("user".to_string()));
        assert!(result.is_err());
    }
}
