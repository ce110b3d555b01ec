use std::error::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShellErrorType {
    ArchiveNotFound,
    ArchiveUnreadable,
    PathNotFound,
    CommandNotRecognized,
    MemberNotFound,
}

impl ShellErrorType {
    /// Startup errors prevent a session from being created at all.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ShellErrorType::ArchiveNotFound | ShellErrorType::ArchiveUnreadable
        )
    }
}

/// For recoverable errors `message` is exactly the text shown to the user.
#[derive(Debug)]
pub struct ShellError {
    pub error_type: ShellErrorType,
    pub message: String,
}

impl ShellError {
    pub fn new(error_type: ShellErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
        }
    }

    pub(crate) fn directory_not_found() -> Self {
        Self::new(
            ShellErrorType::PathNotFound,
            "Directory not found.".to_string(),
        )
    }

    pub(crate) fn file_not_found() -> Self {
        Self::new(ShellErrorType::MemberNotFound, "File not found.".to_string())
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.error_type, self.message)
    }
}

impl From<std::io::Error> for ShellError {
    fn from(error: std::io::Error) -> Self {
        let error_type = match error.kind() {
            std::io::ErrorKind::NotFound => ShellErrorType::ArchiveNotFound,
            _ => ShellErrorType::ArchiveUnreadable,
        };
        Self {
            error_type,
            message: error.to_string(),
        }
    }
}

impl Error for ShellError {}

pub type Result<T> = std::result::Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_map_to_startup_kinds() {
        let missing: ShellError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(missing.error_type, ShellErrorType::ArchiveNotFound);
        assert!(missing.error_type.is_fatal());

        let broken: ShellError =
            std::io::Error::new(std::io::ErrorKind::InvalidData, "bad header").into();
        assert_eq!(broken.error_type, ShellErrorType::ArchiveUnreadable);
    }

    #[test]
    fn recoverable_errors_carry_user_text() {
        let err = ShellError::directory_not_found();
        assert!(!err.error_type.is_fatal());
        assert_eq!(err.message, "Directory not found.");
        assert_eq!(ShellError::file_not_found().message, "File not found.");
    }
}
