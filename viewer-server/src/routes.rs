//! Request handlers.

use crate::{
    common::*,
    error::ApiError,
    state::{AppState, LoadedDataset},
};
use axum::extract::rejection::{JsonRejection, PathRejection};
use tower_http::services::ServeDir;

/// The multipart field carrying the annotation file.
pub const UPLOAD_FIELD: &str = "file";

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the COCO Viewer API." }))
}

/// Loads a COCO annotation file and returns its reshaped form.
///
/// The active dataset is replaced only if the whole file reshapes.
pub async fn load_dataset(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Arc<ReshapedDataset>>, ApiError> {
    let bytes = loop {
        let field = multipart
            .next_field()
            .await?
            .ok_or(ApiError::NoFileUploaded)?;

        if field.name() == Some(UPLOAD_FIELD) {
            break field.bytes().await?;
        }
    };
    info!("received annotation file of {} bytes", bytes.len());

    let dataset = tokio::task::spawn_blocking(move || LoadedDataset::from_slice(&bytes))
        .await
        .context("reshaping task failed")??;
    info!("loaded dataset with {}", dataset.document.summary());

    let reshaped = dataset.reshaped.clone();
    state.replace_dataset(dataset).await;
    Ok(Json(reshaped))
}

pub async fn get_dataset(
    State(state): State<AppState>,
) -> Result<Json<Arc<ReshapedDataset>>, ApiError> {
    let dataset = state.dataset().await?;
    Ok(Json(dataset.reshaped))
}

pub async fn get_images(State(state): State<AppState>) -> Result<Json<Vec<Image>>, ApiError> {
    let dataset = state.dataset().await?;
    Ok(Json(dataset.document.images.clone()))
}

/// All raw annotations of an image, with every field they carry.
pub async fn get_annotations(
    State(state): State<AppState>,
    image_id: Result<UrlPath<ImageId>, PathRejection>,
) -> Result<Json<Vec<RawAnnotation>>, ApiError> {
    let UrlPath(image_id) = image_id?;
    let dataset = state.dataset().await?;
    dataset.image(image_id)?;

    let annotations: Vec<_> = dataset.document.annotations_of(image_id).cloned().collect();
    Ok(Json(annotations))
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetImageDirectory {
    pub path: PathBuf,
}

pub async fn set_image_directory(
    State(state): State<AppState>,
    request: Result<Json<SetImageDirectory>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(SetImageDirectory { path }) = request?;

    let is_dir = tokio::fs::metadata(&path)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Err(ApiError::InvalidDirectory(path));
    }

    info!("serving images from '{}'", path.display());
    state.set_image_dir(path.clone()).await;

    Ok(Json(json!({
        "message": "Image directory set.",
        "path": path,
    })))
}

/// Serves a file under the image directory.
///
/// The mount path is stripped from the request URI before it is resolved
/// against the directory.
pub async fn serve_image(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response, ApiError> {
    let dir = state
        .image_dir()
        .await
        .ok_or(ApiError::ImageDirectoryUnset)?;

    let (mut parts, body) = request.into_parts();
    let file_path = parts
        .uri
        .path()
        .strip_prefix(state.config().images.mount_path.as_str())
        .unwrap_or("/")
        .to_owned();
    parts.uri = Uri::builder()
        .path_and_query(file_path)
        .build()
        .context("invalid image path")?;

    let response = match ServeDir::new(dir)
        .oneshot(Request::from_parts(parts, body))
        .await
    {
        Ok(response) => response,
        Err(never) => match never {},
    };
    Ok(response.map(boxed))
}
