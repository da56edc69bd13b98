pub use indexmap::IndexMap;
pub use log::debug;
pub use serde::{Deserialize, Deserializer, Serialize};
pub use serde_json::{Map, Value};
pub use std::fmt;
pub use thiserror::Error;
