//! Server configuration format.

use crate::common::*;

pub use cors::*;
pub use images::*;
pub use server::*;

/// The configuration versions this build understands.
pub const CONFIG_VERSION_REQ: &str = "0.1";

/// The main server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version", deserialize_with = "deserialize_version")]
    pub version: Version,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub images: ImagesConfig,
}

impl Config {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = fs::read_to_string(path)?;
        let config: Self = json5::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let mount_path = &self.images.mount_path;
        ensure!(
            mount_path.starts_with('/') && mount_path.len() > 1 && !mount_path.ends_with('/'),
            "mount_path must start with '/' and must not end with '/', but get '{}'",
            mount_path
        );
        ensure!(self.server.body_limit > 0, "body_limit must be positive");
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            images: ImagesConfig::default(),
        }
    }
}

mod server {
    use super::*;

    /// Listening options.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ServerConfig {
        #[serde(default = "default_addr")]
        pub addr: SocketAddr,
        /// The maximum size of an uploaded annotation file in bytes.
        #[serde(default = "default_body_limit")]
        pub body_limit: usize,
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                addr: default_addr(),
                body_limit: default_body_limit(),
            }
        }
    }

    fn default_addr() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 8000))
    }

    fn default_body_limit() -> usize {
        512 * 1024 * 1024
    }
}

mod cors {
    use super::*;

    /// Cross-origin request options.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CorsConfig {
        /// Origins allowed to send credentialed requests.
        #[serde(default = "default_allowed_origins")]
        pub allowed_origins: Vec<String>,
    }

    impl Default for CorsConfig {
        fn default() -> Self {
            Self {
                allowed_origins: default_allowed_origins(),
            }
        }
    }

    fn default_allowed_origins() -> Vec<String> {
        [
            "http://localhost",
            "http://localhost:5173",
            "http://localhost:5174",
            "http://127.0.0.1:5173",
            "http://127.0.0.1:5174",
        ]
        .iter()
        .map(|origin| origin.to_string())
        .collect()
    }
}

mod images {
    use super::*;

    /// Static image options.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ImagesConfig {
        /// The initial image directory. It can be changed at runtime.
        #[serde(default)]
        pub dir: Option<PathBuf>,
        /// The URL prefix images are served under.
        #[serde(default = "default_mount_path")]
        pub mount_path: String,
    }

    impl Default for ImagesConfig {
        fn default() -> Self {
            Self {
                dir: None,
                mount_path: default_mount_path(),
            }
        }
    }

    fn default_mount_path() -> String {
        "/images".into()
    }
}

fn default_version() -> Version {
    Version::new(0, 1, 0)
}

pub fn deserialize_version<'de, D>(deserializer: D) -> Result<Version, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let version = Version::parse(&text).map_err(|err| {
        D::Error::custom(format!(
            "failed to parse version number '{}': {:?}",
            text, err
        ))
    })?;
    let req = VersionReq::parse(CONFIG_VERSION_REQ).map_err(D::Error::custom)?;

    if !req.matches(&version) {
        return Err(D::Error::custom(format!(
            "incompatible version: get '{}', but it is incompatible with requirement '{}'",
            version, req,
        )));
    }

    Ok(version)
}
