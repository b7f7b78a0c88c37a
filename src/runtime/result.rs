//! Success-or-errors outcome of a mutating operation.

const GENERIC_ERROR: &str = "The operation failed.";

/// Outcome of a create or update
///
/// Success is derived from the error list and never stored: a result with no
/// errors is a success and carries its value, a result with errors is a
/// failure and carries none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultModel<T> {
    value: Option<T>,
    errors: Vec<String>,
}

impl<T> ResultModel<T> {
    /// A successful outcome holding `value`
    pub fn success(value: T) -> Self {
        ResultModel {
            value: Some(value),
            errors: Vec::new(),
        }
    }

    /// A failed outcome with a single error
    pub fn failure(error: impl Into<String>) -> Self {
        ResultModel {
            value: None,
            errors: vec![error.into()],
        }
    }

    /// A failed outcome with several errors
    ///
    /// An empty list still produces a failure, with a generic error message.
    pub fn failures<I, S>(errors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut errors: Vec<String> = errors.into_iter().map(Into::into).collect();
        if errors.is_empty() {
            errors.push(GENERIC_ERROR.to_string());
        }
        ResultModel {
            value: None,
            errors,
        }
    }

    /// True when there are no errors
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// The value of a successful outcome
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Errors of a failed outcome, empty on success
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Convert into a standard `Result`
    pub fn into_result(self) -> Result<T, Vec<String>> {
        match self.value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(self.errors),
        }
    }
}

impl<T> From<ResultModel<T>> for Result<T, Vec<String>> {
    fn from(result: ResultModel<T>) -> Self {
        result.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        let result = ResultModel::success(42);
        assert!(result.is_success());
        assert_eq!(result.value(), Some(&42));
        assert!(result.errors().is_empty());
        assert_eq!(result.into_result(), Ok(42));
    }

    #[test]
    fn test_failure() {
        let result: ResultModel<i32> = ResultModel::failure("The entity was not found.");
        assert!(!result.is_success());
        assert_eq!(result.value(), None);
        assert_eq!(result.errors(), ["The entity was not found."]);
    }

    #[test]
    fn test_failures_keep_order() {
        let result: ResultModel<()> = ResultModel::failures(["Title is required", "Body is too long"]);
        assert!(!result.is_success());
        assert_eq!(result.errors(), ["Title is required", "Body is too long"]);
    }

    #[test]
    fn test_empty_failure_list_is_still_a_failure() {
        let result: ResultModel<String> = ResultModel::failures(Vec::<String>::new());
        assert!(!result.is_success());
        assert_eq!(result.errors().len(), 1);
        let converted: Result<String, Vec<String>> = result.into();
        assert!(converted.is_err());
    }
}
