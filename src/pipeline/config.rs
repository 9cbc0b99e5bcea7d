use std::{
    fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error
    }
}

/// Optional JSON run configuration. Every field has a default, and CLI flags
/// override whatever the file says.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub data: DataSection,
    #[serde(default)]
    pub build: BuildSection,
    #[serde(default)]
    pub params: ParamsSection
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DataSection {
    pub events: Option<PathBuf>,
    pub results: Option<PathBuf>,
    pub fighters: Option<PathBuf>
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct BuildSection {
    pub dir: PathBuf,
    pub unified: String,
    pub classified: String,
    pub elo_history: String,
    pub elo_ratings: String,
    pub elo_ratings_simple: String,
    pub peak: String,
    pub peak_simple: String
}

impl Default for BuildSection {
    fn default() -> Self {
        BuildSection {
            dir: PathBuf::from("build"),
            unified: "fights_unified.csv".to_string(),
            classified: "fights_classified.csv".to_string(),
            elo_history: "elo_history.csv".to_string(),
            elo_ratings: "elo_ratings_current.csv".to_string(),
            elo_ratings_simple: "elo_ratings_simple.csv".to_string(),
            peak: "elo_peak_ratings.csv".to_string(),
            peak_simple: "elo_peak_ratings_simple.csv".to_string()
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ParamsSection {
    #[serde(default)]
    pub classify: ClassifySection,
    #[serde(default)]
    pub elo: EloSection
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClassifySection {
    pub m_finish: Option<f64>,
    pub m_dom: Option<f64>,
    pub m_dec: Option<f64>
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EloSection {
    pub k: Option<f64>,
    pub scale: Option<f64>,
    pub base_rating: Option<f64>
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<FileConfig, ConfigFileError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
            path: path.display().to_string(),
            source
        })?;

        serde_json::from_str(&text).map_err(|source| ConfigFileError::Parse {
            path: path.display().to_string(),
            source
        })
    }
}
