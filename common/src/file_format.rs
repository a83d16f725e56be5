use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum FileExtensionError {
    #[error("Failed to get file extension")]
    MissingFileExtension,
    #[error("Unsupported file extension for file: {0}")]
    UnsupportedFileExtension(String),
}

pub type FileFormatResult<T> = Result<T, FileExtensionError>;

/// Lowercased extension of `path`, if it has a UTF-8 one.
pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|os_str| os_str.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Text formats used for configuration and persisted settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SerdeFormat {
    Json,
    Toml,
}

impl SerdeFormat {
    pub fn from_file_name(path: &Path) -> FileFormatResult<Self> {
        let ext = get_file_extension(path).ok_or(FileExtensionError::MissingFileExtension)?;

        match ext.as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(FileExtensionError::UnsupportedFileExtension(
                path.display().to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension_is_case_insensitive() {
        assert_eq!(
            SerdeFormat::from_file_name(Path::new("settings.TOML")).unwrap(),
            SerdeFormat::Toml
        );
        assert_eq!(
            SerdeFormat::from_file_name(Path::new("dir/config.json")).unwrap(),
            SerdeFormat::Json
        );
    }

    #[test]
    fn test_unknown_or_missing_extension() {
        assert!(matches!(
            SerdeFormat::from_file_name(Path::new("config.yaml")),
            Err(FileExtensionError::UnsupportedFileExtension(_))
        ));
        assert!(matches!(
            SerdeFormat::from_file_name(Path::new("config")),
            Err(FileExtensionError::MissingFileExtension)
        ));
    }
}
