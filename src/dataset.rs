use std::fs;
use std::path::Path;

use crate::model::{DataError, GameData};

/// File name offered when the dataset is downloaded.
pub const EXPORT_FILE_NAME: &str = "floramaster-data.json";

const REQUIRED_KEYS: [&str; 3] = ["questions", "images", "pairs"];

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("document is not valid JSON: {0}")]
    Syntax(serde_json::Error),
    #[error("document is not a JSON object")]
    NotAnObject,
    #[error("document is missing the `{0}` section")]
    MissingKey(&'static str),
    #[error("document has an unexpected shape: {0}")]
    Shape(serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] DataError),
}

impl PartialEq for ImportError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Syntax(_), Self::Syntax(_)) => true,
            (Self::NotAnObject, Self::NotAnObject) => true,
            (Self::MissingKey(left), Self::MissingKey(right)) => left == right,
            (Self::Shape(_), Self::Shape(_)) => true,
            (Self::Invalid(left), Self::Invalid(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for ImportError {}

#[derive(Debug, thiserror::Error)]
pub enum DatasetFileError {
    #[error("failed to read dataset file at {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to write dataset file at {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to import dataset file at {path}: {source}")]
    Import { path: String, source: ImportError },
    #[error("failed to serialize dataset: {0}")]
    Serialize(serde_json::Error),
}

impl PartialEq for DatasetFileError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Read { path: left, .. }, Self::Read { path: right, .. }) => left == right,
            (Self::Write { path: left, .. }, Self::Write { path: right, .. }) => left == right,
            (
                Self::Import {
                    path: left,
                    source: left_source,
                },
                Self::Import {
                    path: right,
                    source: right_source,
                },
            ) => left == right && left_source == right_source,
            (Self::Serialize(_), Self::Serialize(_)) => true,
            _ => false,
        }
    }
}

impl Eq for DatasetFileError {}

impl GameData {
    /// Parses and validates an exported document.
    pub fn from_json(json: &str) -> Result<Self, ImportError> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(ImportError::Syntax)?;
        let object = value.as_object().ok_or(ImportError::NotAnObject)?;

        if let Some(missing) = REQUIRED_KEYS.iter().find(|key| !object.contains_key(**key)) {
            return Err(ImportError::MissingKey(*missing));
        }

        let data: GameData = serde_json::from_value(value).map_err(ImportError::Shape)?;
        data.validate()?;

        Ok(data)
    }

    /// Serializes the dataset with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Replaces `self` with the imported document, or leaves it untouched on error.
    pub fn import(&mut self, json: &str) -> Result<(), ImportError> {
        match GameData::from_json(json) {
            Ok(data) => {
                log::info!(
                    "imported {} questions, {} images, {} pairs",
                    data.questions.len(),
                    data.images.len(),
                    data.pairs.len()
                );
                *self = data;
                Ok(())
            }
            Err(error) => {
                log::warn!("rejected dataset import: {error}");
                Err(error)
            }
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DatasetFileError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DatasetFileError::Read {
            path: path.display().to_string(),
            source,
        })?;

        GameData::from_json(&text).map_err(|source| DatasetFileError::Import {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), DatasetFileError> {
        let path = path.as_ref();
        let json = self.to_json_pretty().map_err(DatasetFileError::Serialize)?;

        fs::write(path, json).map_err(|source| DatasetFileError::Write {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("exported dataset to {}", path.display());

        Ok(())
    }
}
