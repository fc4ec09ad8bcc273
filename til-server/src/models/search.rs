//! Search term validation

use super::ValidationError;

/// Non-empty exact-match search term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Validate the `term` query parameter.
    ///
    /// # Example
    /// ```
    /// use til_server::models::SearchTerm;
    ///
    /// assert!(SearchTerm::new(Some("OMG")).is_ok());
    /// assert!(SearchTerm::new(Some("")).is_err());
    /// assert!(SearchTerm::new(None).is_err());
    /// ```
    pub fn new(raw: Option<&str>) -> Result<Self, ValidationError> {
        match raw {
            None => Err(ValidationError::Missing { field: "term" }),
            Some("") => Err(ValidationError::Empty { field: "term" }),
            Some(term) => Ok(Self(term.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact comparison used by storage backends without SQL.
    pub fn matches(&self, value: &str) -> bool {
        self.0 == value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_only() {
        let term = SearchTerm::new(Some("OMG")).unwrap();
        assert!(term.matches("OMG"));
        assert!(!term.matches("omg"));
        assert!(!term.matches("OMG!"));
    }

    #[test]
    fn rejects_missing_and_empty() {
        assert_eq!(
            SearchTerm::new(None).unwrap_err(),
            ValidationError::Missing { field: "term" }
        );
        assert_eq!(
            SearchTerm::new(Some("")).unwrap_err(),
            ValidationError::Empty { field: "term" }
        );
    }
}
