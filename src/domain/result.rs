//! Result type alias for chatmask

use super::errors::MaskError;

/// Result type alias for chatmask operations
///
/// # Examples
///
/// ```
/// use chatmask::domain::result::Result;
/// use chatmask::domain::errors::MaskError;
///
/// fn failing_function() -> Result<()> {
///     Err(MaskError::InvalidInput("No text provided".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MaskError>;

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
