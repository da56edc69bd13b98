use crate::common::*;

/// The annotation keys the reshaper requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationField {
    Id,
    Bbox,
    ImageId,
    CategoryId,
}

impl AnnotationField {
    /// The JSON key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Bbox => "bbox",
            Self::ImageId => "image_id",
            Self::CategoryId => "category_id",
        }
    }
}

impl fmt::Display for AnnotationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReshapeError {
    /// An annotation record lacks a required key.
    #[error("annotation at index {index} is missing key '{field}'")]
    MissingField {
        field: AnnotationField,
        /// Position of the record in the annotation list.
        index: usize,
    },
}

impl ReshapeError {
    pub fn field(&self) -> AnnotationField {
        match *self {
            Self::MissingField { field, .. } => field,
        }
    }
}
