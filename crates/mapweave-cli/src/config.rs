use anyhow::{Context, Result};
use mapweave_core::{KeyTypePolicy, TypeCatalog, TypeDescriptor};
use mapweave_sql::Flavor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default name of the configuration file
pub const CONFIG_FILE: &str = "mapweave.toml";

/// Configuration for mapweave CLI operations
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where mapping documents are found and how outputs are named
    #[serde(default)]
    pub mapper: MapperConfig,

    /// Known mapper interface types
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config `{}`", path.display()))?;
        contents
            .parse()
            .with_context(|| format!("invalid config `{}`", path.display()))
    }

    /// Set the mapper configuration
    pub fn mapper(mut self, mapper: MapperConfig) -> Self {
        self.mapper = mapper;
        self
    }

    /// Add a mapper interface type
    pub fn ty(mut self, ty: TypeDescriptor) -> Self {
        self.types.push(ty);
        self
    }

    /// Builds the catalog the merge resolves namespaces against
    pub fn type_catalog(&self) -> TypeCatalog {
        self.types.iter().cloned().collect()
    }
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let toml_str = toml::to_string_pretty(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", toml_str)
    }
}

/// Configuration for locating mapping documents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapperConfig {
    /// A mapping document, or a directory searched recursively
    pub location: PathBuf,

    /// Regex the whole file name must match when `location` is a directory
    pub pattern: String,

    /// Part of the input file name replaced to form the output name
    pub replace_from: String,

    /// Replacement for `replace_from`
    pub replace_to: String,

    /// Overwrite outputs that already exist
    pub overwrite: bool,

    /// Which contract's key type wins when more than one binds a key
    pub key_type_policy: KeyTypePolicy,

    /// SQL flavor of the generated statements
    pub flavor: Flavor,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            location: PathBuf::from("src/main/resources/mapper"),
            pattern: String::from(r".*Mapper\.xml"),
            replace_from: String::from("Mapper.xml"),
            replace_to: String::from("MapperExt.xml"),
            overwrite: false,
            key_type_policy: KeyTypePolicy::default(),
            flavor: Flavor::default(),
        }
    }
}

impl MapperConfig {
    /// Create a new MapperConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the location searched for mapping documents
    pub fn location(mut self, location: impl Into<PathBuf>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the file name pattern
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Set how output file names are derived from input file names
    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.replace_from = from.into();
        self.replace_to = to.into();
        self
    }

    /// Set whether existing outputs are overwritten
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set the key type policy
    pub fn key_type_policy(mut self, policy: KeyTypePolicy) -> Self {
        self.key_type_policy = policy;
        self
    }

    /// Set the SQL flavor
    pub fn flavor(mut self, flavor: Flavor) -> Self {
        self.flavor = flavor;
        self
    }
}
