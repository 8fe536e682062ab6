//! Codec configuration.

use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map},
};
use serde::{Deserialize, Serialize};

/// Settings for the default [`DynAbiCodec`](crate::DynAbiCodec).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Require `bytesN` arguments to be exactly `N` bytes long instead of right-padding shorter
    /// values.
    pub strict_bytes_type_checking: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { strict_bytes_type_checking: true }
    }
}

impl CodecConfig {
    /// The file name of the optional configuration file, relative to the working directory.
    pub const FILE_NAME: &'static str = "abi-resolver.toml";

    /// The prefix of the environment variables overriding configuration values.
    pub const ENV_PREFIX: &'static str = "ABI_RESOLVER_";

    /// Returns the default figment: defaults, merged with [`Self::FILE_NAME`], merged with
    /// `ABI_RESOLVER_*` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Self::default())
            .merge(Toml::file(Self::FILE_NAME))
            .merge(Env::prefixed(Self::ENV_PREFIX))
    }

    /// Loads the configuration from [`figment`](Self::figment).
    pub fn load() -> Result<Self, figment::Error> {
        Self::from_provider(Self::figment())
    }

    /// Extracts a configuration from any figment provider.
    pub fn from_provider<T: Provider>(provider: T) -> Result<Self, figment::Error> {
        let config: Self = Figment::from(provider).extract()?;
        trace!(?config, "loaded codec config");
        Ok(config)
    }
}

impl Provider for CodecConfig {
    fn metadata(&self) -> Metadata {
        Metadata::named("ABI resolver codec config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}
