//! Declarative configuration for the provisioning pipeline.
//!
//! The configuration is a YAML document; see the crate-level documentation
//! for the full shape. Path defaults mirror the file names the pipeline
//! falls back to when a section is omitted.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::csr::params::RequestParams;
use crate::error::Error;
use crate::key::KeyAlgorithm;

pub type Result<T> = std::result::Result<T, Error>;

/// Environment variable naming an alternative configuration file.
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
/// Configuration file consulted when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Default private key output path.
pub const DEFAULT_KEY_OUTPUT: &str = "private.key";
/// Default certificate request output path.
pub const DEFAULT_CSR_OUTPUT: &str = "certificate.pem";

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub key: KeyConfig,
    #[serde(default)]
    pub csr: CsrConfig,
    #[serde(default)]
    pub certificate: CertificateConfig,
}

/// Key-related settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Algorithm family selector.
    #[serde(rename = "type")]
    pub kind: KeyKind,
    /// RSA modulus size in bits; ignored for ed25519.
    pub bits: usize,
    /// Private key file path.
    pub output: PathBuf,
    /// When set and non-empty, the private key is written password-encrypted.
    pub password: Option<String>,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            kind: KeyKind::Ed25519,
            bits: 2048,
            output: PathBuf::from(DEFAULT_KEY_OUTPUT),
            password: None,
        }
    }
}

/// Supported values for `key.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyKind {
    Ed25519,
    Rsa,
}

/// Certificate request subject settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CsrConfig {
    pub common_name: String,
    pub organization: Option<String>,
    pub organizational_unit: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub locality: Option<String>,
    pub ip_address: Option<String>,
}

/// Certificate request output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CertificateConfig {
    pub output: PathBuf,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_CSR_OUTPUT),
        }
    }
}

impl Config {
    /// Parses a YAML configuration document.
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| Error::Configuration(e.to_string()))
    }

    /// Checks the cross-field requirements the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.csr.common_name.is_empty() {
            return Err(Error::Configuration(
                "csr.common_name is required".to_string(),
            ));
        }
        if self.key.kind == KeyKind::Rsa && self.key.bits < 2048 {
            return Err(Error::Configuration(
                "key.bits must be at least 2048 for RSA keys".to_string(),
            ));
        }
        Ok(())
    }

    /// The key algorithm requested by this configuration.
    pub fn key_algorithm(&self) -> KeyAlgorithm {
        match self.key.kind {
            KeyKind::Ed25519 => KeyAlgorithm::Ed25519,
            KeyKind::Rsa => KeyAlgorithm::Rsa {
                bits: self.key.bits,
            },
        }
    }

    /// The subject parameters for the certificate request.
    ///
    /// Empty optional fields are normalized to absent.
    pub fn request_params(&self) -> RequestParams {
        RequestParams {
            common_name: self.csr.common_name.clone(),
            organization: normalize(&self.csr.organization),
            organizational_unit: normalize(&self.csr.organizational_unit),
            country: normalize(&self.csr.country),
            state: normalize(&self.csr.state),
            locality: normalize(&self.csr.locality),
            ip_address: normalize(&self.csr.ip_address),
        }
    }

    /// Resolved private key output path.
    pub fn key_output(&self) -> PathBuf {
        resolve_path(&self.key.output, DEFAULT_KEY_OUTPUT)
    }

    /// Resolved certificate request output path.
    pub fn csr_output(&self) -> PathBuf {
        resolve_path(&self.certificate.output, DEFAULT_CSR_OUTPUT)
    }
}

fn normalize(field: &Option<String>) -> Option<String> {
    field.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

fn resolve_path(configured: &Path, default: &str) -> PathBuf {
    if configured.as_os_str().is_empty() {
        PathBuf::from(default)
    } else {
        configured.to_path_buf()
    }
}

/// Source of validated configuration for the pipeline.
pub trait ConfigProvider {
    fn load(&self) -> Result<Config>;
}

/// Loads YAML configuration from a file path, honoring the `CONFIG_PATH`
/// environment variable.
pub struct YamlConfigProvider {
    path: PathBuf,
}

impl YamlConfigProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolves the configuration path from the environment, falling back to
    /// `config.yaml` in the working directory.
    pub fn from_env() -> Self {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigProvider for YamlConfigProvider {
    fn load(&self) -> Result<Config> {
        let text = std::fs::read_to_string(&self.path)?;
        Config::from_yaml(&text)
    }
}
