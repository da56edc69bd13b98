//! COCO annotation file types.
//!
//! Only the keys the viewer reads are typed. Everything else an image,
//! category or annotation carries is kept in a flattened `extra` map and
//! serialized back unchanged.

use crate::common::*;

pub type ImageId = i64;
pub type CategoryId = i64;
pub type AnnotationId = i64;

/// An image record.
///
/// Only `id` is read. `file_name`, `width`, `height` and any other key are
/// kept exactly as parsed, `null`s included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Image {
    pub fn file_name(&self) -> Option<&str> {
        self.extra.get("file_name").and_then(|name| name.as_str())
    }
}

/// A category record. Only `id` is read; the rest passes through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Category {
    pub fn name(&self) -> Option<&str> {
        self.extra.get("name").and_then(|name| name.as_str())
    }
}

/// An annotation record as it appears in the uploaded file.
///
/// `None` means the key is absent, so that [reshape](crate::reshape()) can
/// report it by name instead of failing the whole parse. A present `null`
/// bbox is kept as `Some(Value::Null)`. A present `null` id is a wrong value
/// type and fails the parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAnnotation {
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<AnnotationId>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_id: Option<ImageId>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub category_id: Option<CategoryId>,
    /// The `[x, y, w, h]` box. Its shape is not checked.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub bbox: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Deserializes a key that is present, whatever its value.
///
/// Paired with `#[serde(default)]`, an absent key stays `None`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A parsed COCO annotation file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CocoDocument {
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub annotations: Vec<RawAnnotation>,
    /// Other top-level keys such as `info` and `licenses`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CocoDocument {
    /// Parses an uploaded annotation file.
    ///
    /// Fails when the payload is not JSON or is not shaped like a COCO file.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    pub fn image(&self, image_id: ImageId) -> Option<&Image> {
        self.images.iter().find(|image| image.id == image_id)
    }

    /// Raw annotations of an image in file order.
    pub fn annotations_of(&self, image_id: ImageId) -> impl Iterator<Item = &RawAnnotation> {
        self.annotations
            .iter()
            .filter(move |ann| ann.image_id == Some(image_id))
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            num_images: self.images.len(),
            num_categories: self.categories.len(),
            num_annotations: self.annotations.len(),
        }
    }
}

/// Record counts of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub num_images: usize,
    pub num_categories: usize,
    pub num_annotations: usize,
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} images, {} categories, {} annotations",
            self.num_images, self.num_categories, self.num_annotations
        )
    }
}
