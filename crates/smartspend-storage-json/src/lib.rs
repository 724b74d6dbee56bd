//! smartspend-storage-json
//!
//! Filesystem-backed JSON implementation of [`ProfileStore`].

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use smartspend_core::{CoreError, ProfileStore};
use smartspend_domain::{FinancialProfile, Goal};
use tracing::debug;

pub const DOCUMENT_SCHEMA_VERSION: u32 = 1;
const PROFILE_FILE: &str = "profile.json";
const GOALS_FILE: &str = "goals.json";
const TMP_SUFFIX: &str = "tmp";

/// Versioned envelope written around every stored document.
#[derive(Debug, Serialize, Deserialize)]
struct Document<T> {
    schema_version: u32,
    updated_at: DateTime<Utc>,
    data: T,
}

/// Stores the profile and goals as JSON documents in one directory.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    dir: PathBuf,
}

impl JsonProfileStore {
    pub fn new(dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn profile_path(&self) -> PathBuf {
        self.dir.join(PROFILE_FILE)
    }

    pub fn goals_path(&self) -> PathBuf {
        self.dir.join(GOALS_FILE)
    }

    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>, CoreError> {
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(path)?;
        let document: Document<T> = serde_json::from_str(&data)
            .map_err(|err| CoreError::Storage(format!("{}: {}", path.display(), err)))?;
        if document.schema_version > DOCUMENT_SCHEMA_VERSION {
            return Err(CoreError::Storage(format!(
                "{} uses schema version {} (supported: {})",
                path.display(),
                document.schema_version,
                DOCUMENT_SCHEMA_VERSION
            )));
        }
        Ok(Some(document.data))
    }

    fn write<T: Serialize>(&self, path: &Path, data: T) -> Result<(), CoreError> {
        let document = Document {
            schema_version: DOCUMENT_SCHEMA_VERSION,
            updated_at: Utc::now(),
            data,
        };
        let json = serde_json::to_string_pretty(&document)
            .map_err(|err| CoreError::Storage(err.to_string()))?;
        let tmp = tmp_path(path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, path)?;
        debug!(path = %path.display(), "document saved");
        Ok(())
    }
}

impl ProfileStore for JsonProfileStore {
    fn load_profile(&self) -> Result<Option<FinancialProfile>, CoreError> {
        self.read(&self.profile_path())
    }

    fn save_profile(&self, profile: &FinancialProfile) -> Result<(), CoreError> {
        self.write(&self.profile_path(), profile)
    }

    fn load_goals(&self) -> Result<Vec<Goal>, CoreError> {
        Ok(self.read(&self.goals_path())?.unwrap_or_default())
    }

    fn save_goals(&self, goals: &[Goal]) -> Result<(), CoreError> {
        self.write(&self.goals_path(), goals)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
