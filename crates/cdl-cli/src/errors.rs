use cdl_core::error::CdlError;
use console::style;
use std::fmt;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for an incomplete dataset
pub fn dataset_incomplete(missing: usize, error: &CdlError) -> CliError {
    CliError::new("Dataset not found or corrupted")
        .with_context(format!("{} archive(s) are missing or failed verification.\n\n{}", missing, error))
        .with_suggestion("Download the releases: cdl download")
        .with_suggestion("Or build with downloading enabled: cdl --download inspect")
        .with_suggestion("Or point at an existing copy: cdl --root /path/to/data verify")
        .with_help("Run: cdl download --help")
}

/// Create error for a query outside the indexed rasters
pub fn query_not_found(error: &CdlError) -> CliError {
    CliError::new("No raster covers the query")
        .with_context(error.to_string())
        .with_suggestion("Check the indexed bounds: cdl inspect")
        .with_suggestion("Time bounds are epoch seconds; pass --start/--end inside a release year")
        .with_help("Run: cdl query --help")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check cdl.toml for syntax errors")
        .with_suggestion("Check the CDL_ROOT, CDL_DOWNLOAD and CDL_CHECKSUM variables")
        .with_help("Run: cdl config")
}

/// Create error for a failed download
pub fn download_failed(url: &str, reason: &str) -> CliError {
    CliError::new("Download failed")
        .with_context(format!("URL: {}\n\nReason: {}", url, reason))
        .with_suggestion("Check your network connection and retry: cdl download")
        .with_suggestion("Or fetch the archive manually into the data directory")
        .with_help("Run: cdl verify")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    if let Some(cdl_error) = error.downcast_ref::<CdlError>() {
        return match cdl_error {
            CdlError::Integrity { missing, .. } => dataset_incomplete(missing.len(), cdl_error),
            CdlError::NotFound { .. } => query_not_found(cdl_error),
            CdlError::ConfigInvalid { key, reason } => invalid_config(key, reason),
            CdlError::Download { url, reason } => download_failed(url, reason),
            CdlError::ChecksumMismatch { .. } => CliError::new("Checksum mismatch")
                .with_context(cdl_error.to_string())
                .with_suggestion("Retry the download: cdl download"),
            other => CliError::new(format!("{:#}", error)).with_context(format!("Caused by: {}", other)),
        };
    }

    let message = format!("{:#}", error);
    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.to_lowercase().contains("permission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
    } else {
        CliError::new(message)
    }
}
