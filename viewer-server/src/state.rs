//! Per-server session state shared by the request handlers.

use crate::{common::*, config::Config, error::ApiError};

/// Handle to the server state. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    config: Arc<Config>,
    session: Arc<RwLock<Session>>,
}

/// What the viewer has set up so far.
#[derive(Debug, Default)]
pub struct Session {
    /// The active dataset. A new upload replaces it.
    pub dataset: Option<LoadedDataset>,
    pub image_dir: Option<PathBuf>,
}

/// An uploaded dataset together with its reshaped form.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub document: Arc<CocoDocument>,
    pub reshaped: Arc<ReshapedDataset>,
}

impl LoadedDataset {
    /// Parses and reshapes an uploaded annotation file.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ApiError> {
        let document = CocoDocument::from_slice(bytes).map_err(ApiError::MalformedJson)?;
        let reshaped = reshape(&document)?;

        Ok(Self {
            document: Arc::new(document),
            reshaped: Arc::new(reshaped),
        })
    }

    pub fn image(&self, image_id: ImageId) -> Result<&Image, ApiError> {
        self.document
            .image(image_id)
            .ok_or(ApiError::ImageNotFound(image_id))
    }
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        let session = Session {
            dataset: None,
            image_dir: config.images.dir.clone(),
        };

        Self {
            config,
            session: Arc::new(RwLock::new(session)),
        }
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub async fn dataset(&self) -> Result<LoadedDataset, ApiError> {
        self.session
            .read()
            .await
            .dataset
            .clone()
            .ok_or(ApiError::NoDataset)
    }

    /// Makes `dataset` the active one and returns the previous one.
    pub async fn replace_dataset(&self, dataset: LoadedDataset) -> Option<LoadedDataset> {
        self.session.write().await.dataset.replace(dataset)
    }

    pub async fn image_dir(&self) -> Option<PathBuf> {
        self.session.read().await.image_dir.clone()
    }

    pub async fn set_image_dir(&self, dir: PathBuf) {
        self.session.write().await.image_dir = Some(dir);
    }
}
