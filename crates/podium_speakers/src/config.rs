//! Configuration for the speaker service.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Bundled defaults (include_str! of podium.toml)
//! 2. ~/.config/podium/podium.toml
//! 3. ./podium.toml

use derive_getters::Getters;
use podium_error::{ConfigError, PodiumError, PodiumResult};
use podium_interface::{AssetPolicy, AssetPolicyBuilder};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Policy applied when registering a speaker image.
///
/// ```toml
/// [speakers.image]
/// max_size_bytes = 10485760
/// allowed_extensions = [".jpg", ".jpeg", ".png", ".webp"]
/// allows_rewrite = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
pub struct ImagePolicyConfig {
    max_size_bytes: u64,
    allowed_extensions: Vec<String>,
    #[serde(default = "default_allows_rewrite")]
    allows_rewrite: bool,
}

fn default_allows_rewrite() -> bool {
    true
}

impl ImagePolicyConfig {
    /// Build the asset policy handed to the media store.
    ///
    /// # Errors
    ///
    /// `ConfigError` when no extension is allowed or the size limit is zero.
    pub fn asset_policy(&self) -> PodiumResult<AssetPolicy> {
        if self.allowed_extensions.is_empty() {
            return Err(ConfigError::new("speakers.image.allowed_extensions must not be empty").into());
        }
        if self.max_size_bytes == 0 {
            return Err(ConfigError::new("speakers.image.max_size_bytes must be positive").into());
        }

        AssetPolicyBuilder::default()
            .max_size_bytes(self.max_size_bytes)
            .allowed_extensions(&self.allowed_extensions)
            .allows_rewrite(self.allows_rewrite)
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid image policy: {}", e)).into())
    }
}

/// Speaker section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
pub struct SpeakersConfig {
    image: ImagePolicyConfig,
}

/// Storage section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
pub struct StorageConfig {
    /// Root directory of the filesystem media store
    media_root: PathBuf,
}

/// Top-level Podium configuration.
///
/// # Example
///
/// ```no_run
/// use podium_speakers::PodiumConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = PodiumConfig::load()?;
/// let policy = config.speakers().image().asset_policy()?;
/// println!("max upload: {} bytes", policy.max_size_bytes());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
pub struct PodiumConfig {
    speakers: SpeakersConfig,
    storage: StorageConfig,
}

const DEFAULT_CONFIG: &str = include_str!("../../../podium.toml");

impl PodiumConfig {
    /// The bundled defaults alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled file cannot be parsed.
    pub fn bundled() -> PodiumResult<Self> {
        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml)),
        )
    }

    /// Bundled defaults overridden by a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> PodiumResult<Self> {
        debug!("Loading configuration from file");

        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
                .add_source(config::File::from(path.as_ref())),
        )
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed.
    #[instrument]
    pub fn load() -> PodiumResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/podium/podium.toml");
            builder = builder.add_source(config::File::from(home_config).required(false));
        }

        builder = builder.add_source(config::File::with_name("podium").required(false));

        Self::from_builder(builder)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> PodiumResult<Self> {
        builder
            .build()
            .map_err(|e| {
                PodiumError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                PodiumError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_config(extensions: &[&str]) -> ImagePolicyConfig {
        ImagePolicyConfig {
            max_size_bytes: 1024,
            allowed_extensions: extensions.iter().map(|e| e.to_string()).collect(),
            allows_rewrite: true,
        }
    }

    #[test]
    fn empty_extensions_rejected() {
        assert!(image_config(&[]).asset_policy().is_err());
    }

    #[test]
    fn extensions_normalized() {
        let policy = image_config(&["PNG", ".Jpg"]).asset_policy().unwrap();
        assert!(policy.allows_extension(".png"));
        assert!(policy.allows_extension(".jpg"));
    }
}
