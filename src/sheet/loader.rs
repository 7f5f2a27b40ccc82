use crate::sheet::models::RawSpecSheet;
use crate::sheet::validation::ValidationResult;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON spec sheet: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML spec sheet: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported spec sheet format '{0}' (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("directory does not exist: {0}")]
    MissingDirectory(String),

    #[error("path is not a directory: {0}")]
    NotADirectory(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Json,
    Toml,
}

impl SheetFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Ok(SheetFormat::Json),
            Some("toml") => Ok(SheetFormat::Toml),
            other => Err(LoadError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }
}

pub fn load_sheet_from_str(content: &str, format: SheetFormat) -> Result<RawSpecSheet, LoadError> {
    let sheet = match format {
        SheetFormat::Json => serde_json::from_str(content)?,
        SheetFormat::Toml => toml::from_str(content)?,
    };
    Ok(sheet)
}

pub fn load_sheet_from_file<P: AsRef<Path>>(path: P) -> Result<RawSpecSheet, LoadError> {
    let path = path.as_ref();
    let format = SheetFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_sheet_from_str(&content, format)
}

/// Loads every `.json`/`.toml` sheet in `directory`, sorted by file name.
/// A file that fails to parse is reported in the validation result and
/// skipped; `paperspec.toml` is the config file, not a sheet.
pub fn load_sheets_from_directory<P: AsRef<Path>>(
    directory: P,
) -> Result<(Vec<(String, RawSpecSheet)>, ValidationResult), LoadError> {
    let dir_path = directory.as_ref();

    if !dir_path.exists() {
        return Err(LoadError::MissingDirectory(dir_path.display().to_string()));
    }

    if !dir_path.is_dir() {
        return Err(LoadError::NotADirectory(dir_path.display().to_string()));
    }

    let io_err = |source| LoadError::Io {
        path: dir_path.display().to_string(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if SheetFormat::from_path(&path).is_err() {
            continue;
        }
        if path.file_name().and_then(|n| n.to_str()) == Some(crate::config::DEFAULT_CONFIG_FILE) {
            continue;
        }
        paths.push(path);
    }
    paths.sort();

    let mut sheets = Vec::new();
    let mut validation = ValidationResult::new();

    for path in paths {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        match load_sheet_from_file(&path) {
            Ok(sheet) => sheets.push((name, sheet)),
            Err(e) => {
                log::warn!("skipping {}: {}", path.display(), e);
                validation.add_error(
                    format!("Failed to parse {}: {}", path.display(), e),
                    Some(name),
                );
            }
        }
    }

    Ok((sheets, validation))
}
