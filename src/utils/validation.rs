use crate::utils::error::{ReportError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extensions(field_name: &str, files: &[String], allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        if let Some(extension) = std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            if !allowed_set.contains(extension.to_ascii_lowercase().as_str()) {
                return Err(ReportError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
        } else {
            return Err(ReportError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: file.clone(),
                reason: "File has no extension or invalid filename".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ReportError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("content", "images/logo.png").is_ok());
        assert!(validate_path("content", "").is_err());
        assert!(validate_path("content", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("level", 0u8, 0, 8).is_ok());
        assert!(validate_range("level", 8u8, 0, 8).is_ok());
        assert!(validate_range("level", 9u8, 0, 8).is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        let files = vec!["deck.pptx".to_string(), "OTHER.PPTX".to_string()];
        assert!(validate_file_extensions("output", &files, &["pptx"]).is_ok());

        let invalid_files = vec!["deck.ppt".to_string()];
        assert!(validate_file_extensions("output", &invalid_files, &["pptx"]).is_err());

        let no_extension = vec!["deck".to_string()];
        assert!(validate_file_extensions("output", &no_extension, &["pptx"]).is_err());
    }
}
