// Copyright (C) 2021 Quentin M. Kniep <hello@quentinkniep.com>
// Distributed under terms of the MIT license.


use std::ffi::OsStr;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::data::basics::Address;
use crate::oracle::SubscriptionParams;

/// The name of the file holding the raffle configuration inside a config root.
pub const CONFIG_FILENAME: &str = "raffle.json";

/// Bump this whenever a default value changes meaning.
pub const CONFIG_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading/writing configuration failed")]
    IoError(#[from] io::Error),
    #[error("JSON (de)serialization failed")]
    SerializationError(#[from] serde_json::Error),
    #[error("could not expand path `{0}`")]
    BadPath(String),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Local holds the per-raffle configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Local {
    /// Tracks the current version of the defaults so old files can be recognized.
    pub version: u32,

    /// The only caller allowed to register participants and drive draws.
    pub operator: Address,

    /// The only caller allowed to deliver random words.
    pub coordinator: Address,

    /// Forwarded to the coordinator with every request.
    pub subscription: SubscriptionParams,

    /// Initial number of winners; can still be changed while idle.
    pub num_winners: Option<u32>,

    /// Whether a pending randomness request may be superseded by a new one.
    pub allow_rerequest: bool,

    /// Caps the raffle's notification outbox; unbounded when unset.
    pub outbox_limit: Option<usize>,
}

impl Default for Local {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            operator: Address::default(),
            coordinator: Address::default(),
            subscription: SubscriptionParams::default(),
            num_winners: None,
            allow_rerequest: true,
            outbox_limit: None,
        }
    }
}

impl Local {
    /// Returns a Local config structure based on merging the defaults
    /// with settings loaded from the config file in the custom dir.
    pub fn load_from_disk(custom: &impl AsRef<OsStr>) -> Result<Self> {
        Self::load_from_file(&Path::new(&custom).join(CONFIG_FILENAME))
    }

    pub fn load_from_file(file: &impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(file)?;
        let c = Self::load(&content)?;
        debug!(path = %file.as_ref().display(), version = c.version, "loaded config");
        Ok(c)
    }

    /// Parses a (possibly partial) JSON document; missing fields take their defaults.
    pub fn load(content: &str) -> Result<Self> {
        let c: Self = serde_json::from_str(content)?;
        c.validate()?;
        Ok(c)
    }

    /// Checks the settings the raffle cannot run without.
    pub fn validate(&self) -> Result<()> {
        if self.operator.is_zero() {
            return Err(ConfigError::Invalid("operator address must be set"));
        }
        if self.coordinator.is_zero() {
            return Err(ConfigError::Invalid("coordinator address must be set"));
        }
        if self.num_winners == Some(0) {
            return Err(ConfigError::Invalid("num_winners must be at least 1"));
        }
        Ok(())
    }

    /// Writes the Local settings into a root/CONFIG_FILENAME file.
    pub fn save_to_disk(&self, root: &str) -> Result<()> {
        let expanded = shellexpand::full(root).map_err(|_| ConfigError::BadPath(root.to_owned()))?;
        let root = Path::new(&*expanded);
        fs::create_dir_all(root)?;
        self.save_to_file(&root.join(CONFIG_FILENAME))
    }

    /// Saves the config to a specific filename, allowing overriding the default name.
    pub fn save_to_file(&self, filename: &impl AsRef<Path>) -> Result<()> {
        let f = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(filename)?;
        serde_json::to_writer_pretty(f, self)?;
        Ok(())
    }
}

/// Retrieves the default directory for raffle config files, `~/.raffle/`.
pub fn get_default_config_file_path() -> io::Result<PathBuf> {
    match dirs::home_dir() {
        Some(home_dir) => Ok(home_dir.join(".raffle")),
        None => Err(io::Error::new(
            io::ErrorKind::NotFound,
            "current user has no home directory",
        )),
    }
}

/// Expands `~` and environment variables in a user supplied root, falling back to the default root.
pub fn resolve_root(root: Option<&str>) -> Result<PathBuf> {
    match root {
        Some(r) => {
            let expanded =
                shellexpand::full(r).map_err(|_| ConfigError::BadPath(r.to_owned()))?;
            Ok(PathBuf::from(expanded.into_owned()))
        }
        None => Ok(get_default_config_file_path()?),
    }
}
