//! The view-optimized dataset layout.

use crate::{common::*, dataset::*, error::*};

/// Image id to category id to the annotations of that pair.
///
/// Both levels keep the order in which keys are first seen. Integer keys are
/// rendered as strings when serialized to JSON.
pub type AnnotationsByImage = IndexMap<ImageId, IndexMap<CategoryId, Vec<ProcessedAnnotation>>>;

/// An annotation stripped down to what the viewer draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedAnnotation {
    pub id: AnnotationId,
    pub bbox: Value,
}

/// The dataset layout sent to the viewer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReshapedDataset {
    pub images: Vec<Image>,
    pub categories: Vec<Category>,
    pub annotations_by_image: AnnotationsByImage,
}

impl ReshapedDataset {
    /// Annotations of an (image, category) pair. Empty if the pair has none.
    pub fn annotations(
        &self,
        image_id: ImageId,
        category_id: CategoryId,
    ) -> &[ProcessedAnnotation] {
        self.annotations_by_image
            .get(&image_id)
            .and_then(|by_category| by_category.get(&category_id))
            .map(|anns| anns.as_slice())
            .unwrap_or(&[])
    }

    pub fn num_annotations(&self) -> usize {
        self.annotations_by_image
            .values()
            .flat_map(|by_category| by_category.values())
            .map(|anns| anns.len())
            .sum()
    }
}

/// Groups the annotations of a document by image and category.
///
/// Annotations are visited once in file order, so every group keeps the
/// relative order of the input. Annotations pointing at unknown images or
/// categories are grouped like any other. The first record lacking `id`,
/// `bbox`, `image_id` or `category_id` aborts the call.
pub fn reshape(doc: &CocoDocument) -> Result<ReshapedDataset, ReshapeError> {
    let mut annotations_by_image = AnnotationsByImage::new();

    for (index, ann) in doc.annotations.iter().enumerate() {
        let missing = |field: AnnotationField| ReshapeError::MissingField { field, index };

        let id = ann.id.ok_or_else(|| missing(AnnotationField::Id))?;
        let bbox = ann
            .bbox
            .as_ref()
            .ok_or_else(|| missing(AnnotationField::Bbox))?;
        let image_id = ann.image_id.ok_or_else(|| missing(AnnotationField::ImageId))?;
        let category_id = ann
            .category_id
            .ok_or_else(|| missing(AnnotationField::CategoryId))?;

        annotations_by_image
            .entry(image_id)
            .or_default()
            .entry(category_id)
            .or_default()
            .push(ProcessedAnnotation {
                id,
                bbox: bbox.clone(),
            });
    }

    debug!(
        "grouped {} annotations over {} images",
        doc.annotations.len(),
        annotations_by_image.len()
    );

    Ok(ReshapedDataset {
        images: doc.images.clone(),
        categories: doc.categories.clone(),
        annotations_by_image,
    })
}
