use std::fmt;

/// Data-integrity failures raised by the layout and aggregation engine.
///
/// None of these are transient; they always indicate bad input and are
/// returned to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// A flow or edge names an entity that is not in the entity set.
    UnknownEntity { id: String },
    /// Layout was requested for zero entities.
    EmptyEntitySet,
    /// Two entity records share the same id.
    DuplicateEntity { id: String },
    /// An entity's category is missing from the configured category order.
    UnknownCategory { entity: String, category: String },
    /// Summed flow counts between two entities do not fit in a `u64`.
    FlowOverflow { source: String, target: String },
    /// The layout configuration is unusable.
    InvalidConfig(String),
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::UnknownEntity { id } => write!(f, "Unknown entity '{id}'"),
            NetworkError::EmptyEntitySet => {
                write!(f, "Cannot lay out an empty entity set")
            }
            NetworkError::DuplicateEntity { id } => write!(f, "Duplicate entity id '{id}'"),
            NetworkError::UnknownCategory { entity, category } => write!(
                f,
                "Entity '{entity}' has category '{category}', which is not in the category order"
            ),
            NetworkError::FlowOverflow { source, target } => {
                write!(f, "Flow total between '{source}' and '{target}' overflows")
            }
            NetworkError::InvalidConfig(reason) => write!(f, "Invalid layout config: {reason}"),
        }
    }
}

impl std::error::Error for NetworkError {}
