//! Validation error types

/// Invariant violations found in an editor state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The document has no pages
    NoPages,
    /// The current page index does not address a page
    PageIndexOutOfRange { index: usize, page_count: usize },
    /// The selected component is not on the current page
    DanglingSelection { component_id: String },
    /// Two components on the same page share an id
    DuplicateComponentId {
        page_id: String,
        component_id: String,
    },
    /// Multiple validation errors
    Multiple(Vec<ValidationError>),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::NoPages => write!(f, "Document has no pages"),
            ValidationError::PageIndexOutOfRange { index, page_count } => {
                write!(
                    f,
                    "Current page index {} is out of range for {} pages",
                    index, page_count
                )
            }
            ValidationError::DanglingSelection { component_id } => {
                write!(
                    f,
                    "Selected component '{}' is not on the current page",
                    component_id
                )
            }
            ValidationError::DuplicateComponentId {
                page_id,
                component_id,
            } => {
                write!(
                    f,
                    "Component id '{}' appears more than once on page '{}'",
                    component_id, page_id
                )
            }
            ValidationError::Multiple(errors) => {
                writeln!(f, "Multiple validation errors:")?;
                for error in errors {
                    writeln!(f, "  - {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}
