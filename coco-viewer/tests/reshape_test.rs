use anyhow::Result;
use coco_viewer::{reshape, AnnotationField, CocoDocument, ReshapeError};
use itertools::Itertools as _;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

lazy_static::lazy_static! {
    static ref DATA_DIR: PathBuf = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("data");
}

fn load_fixture(file_name: &str) -> Result<(Value, CocoDocument)> {
    let bytes = std::fs::read(DATA_DIR.join(file_name))?;
    let value: Value = serde_json::from_slice(&bytes)?;
    let doc = CocoDocument::from_slice(&bytes)?;
    Ok((value, doc))
}

#[test]
fn passthrough_test() -> Result<()> {
    let (value, doc) = load_fixture("instances_mini.json")?;
    let reshaped = serde_json::to_value(&reshape(&doc)?)?;

    assert_eq!(reshaped["images"], value["images"]);
    assert_eq!(reshaped["categories"], value["categories"]);

    // the input is left as parsed
    assert_eq!(doc, CocoDocument::from_value(value)?);
    Ok(())
}

#[test]
fn processed_annotation_fields_test() -> Result<()> {
    let (value, doc) = load_fixture("instances_mini.json")?;
    let reshaped = serde_json::to_value(&reshape(&doc)?)?;

    let raw_anns = value["annotations"].as_array().unwrap();
    for raw in raw_anns {
        let image_key = raw["image_id"].to_string();
        let category_key = raw["category_id"].to_string();
        let group = reshaped["annotations_by_image"][&image_key][&category_key]
            .as_array()
            .unwrap();
        let processed = group
            .iter()
            .find(|ann| ann["id"] == raw["id"])
            .unwrap();

        assert_eq!(processed, &json!({ "id": raw["id"], "bbox": raw["bbox"] }));
    }
    Ok(())
}

#[test]
fn grouping_test() -> Result<()> {
    let (_, doc) = load_fixture("instances_mini.json")?;
    let reshaped = reshape(&doc)?;

    let expect = doc
        .annotations
        .iter()
        .map(|ann| ((ann.image_id.unwrap(), ann.category_id.unwrap()), ann.id.unwrap()))
        .into_group_map();

    assert_eq!(expect.len(), 4);
    assert_eq!(reshaped.num_annotations(), doc.annotations.len());

    for ((image_id, category_id), ids) in expect {
        let actual: Vec<_> = reshaped
            .annotations(image_id, category_id)
            .iter()
            .map(|ann| ann.id)
            .collect();
        assert_eq!(actual, ids);
    }

    // image and category keys keep first-seen order
    let image_ids: Vec<_> = reshaped.annotations_by_image.keys().copied().collect();
    assert_eq!(image_ids, vec![397133, 37777, 999999]);
    let category_ids: Vec<_> = reshaped.annotations_by_image[&397133]
        .keys()
        .copied()
        .collect();
    assert_eq!(category_ids, vec![1, 44]);

    // dangling references are grouped anyway
    assert_eq!(reshaped.annotations(999999, 12345).len(), 1);
    Ok(())
}

#[test]
fn missing_bbox_test() -> Result<()> {
    let (_, doc) = load_fixture("missing_bbox.json")?;
    let err = reshape(&doc).unwrap_err();

    assert_eq!(
        err,
        ReshapeError::MissingField {
            field: AnnotationField::Bbox,
            index: 1,
        }
    );
    assert_eq!(err.to_string(), "annotation at index 1 is missing key 'bbox'");
    Ok(())
}

#[test]
fn serialized_round_trip_test() -> Result<()> {
    let (_, doc) = load_fixture("instances_mini.json")?;
    let reshaped = reshape(&doc)?;
    let text = serde_json::to_string(&reshaped)?;
    assert_eq!(serde_json::from_str::<coco_viewer::ReshapedDataset>(&text)?, reshaped);
    Ok(())
}
