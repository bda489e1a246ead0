use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration file format: {path}: {source}")]
    ConfigFormatError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Image error for '{path}': {source}")]
    ImageError {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Slide {index} ('{title}'): {message}")]
    SlideError {
        index: usize,
        title: String,
        message: String,
    },

    #[error("Plot data error in '{path}' line {line}: {message}")]
    PlotDataError {
        path: String,
        line: usize,
        message: String,
    },

    #[error("Package write error: {message}")]
    PackageError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Rendering,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::ConfigFormatError { .. }
            | ReportError::MissingConfigError { .. }
            | ReportError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ReportError::ImageError { .. }
            | ReportError::PlotDataError { .. }
            | ReportError::IoError(_) => ErrorCategory::Input,
            ReportError::SlideError { .. } => ErrorCategory::Rendering,
            ReportError::ZipError(_) | ReportError::PackageError { .. } => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Rendering => ErrorSeverity::Medium,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReportError::ConfigFormatError { .. } => {
                "Check the configuration file is valid JSON with a top-level \"presentation\" array"
            }
            ReportError::MissingConfigError { .. } => {
                "Add the missing field to the slide entry (plot slides need \"configuration\" with \"x-label\" and \"y-label\")"
            }
            ReportError::InvalidConfigValueError { .. } => {
                "Fix the highlighted value in the configuration file"
            }
            ReportError::ImageError { .. } => {
                "Make sure the picture exists and is a PNG, JPEG, GIF, BMP or TIFF file"
            }
            ReportError::PlotDataError { .. } => {
                "Every non-empty line of a plot data file must look like `x;y` with numeric values"
            }
            ReportError::SlideError { .. } => {
                "Check the slide's \"content\" matches its \"type\""
            }
            ReportError::IoError(_) => "Check that input files exist and the output directory is writable",
            ReportError::ZipError(_) | ReportError::PackageError { .. } => {
                "Retry; if the problem persists, report it with the configuration file attached"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::ConfigFormatError { path, .. } => {
                format!("Invalid configuration file format: {}", path)
            }
            ReportError::MissingConfigError { field } => {
                format!("The configuration is missing '{}'", field)
            }
            ReportError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
