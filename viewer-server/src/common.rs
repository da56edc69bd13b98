//! Common imports from external crates.

pub use anyhow::{ensure, Context as _, Result};
pub use axum::{
    body::{boxed, Body},
    extract::{DefaultBodyLimit, Multipart, Path as UrlPath, State},
    http::{HeaderValue, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
pub use coco_viewer::{
    reshape, CocoDocument, Image, ImageId, RawAnnotation, ReshapeError, ReshapedDataset,
};
pub use semver::{Version, VersionReq};
pub use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
pub use serde_json::{json, Value};
pub use std::{
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
pub use thiserror::Error;
pub use tokio::sync::RwLock;
pub use tower::ServiceExt as _;
pub use tracing::{error, info, warn};
