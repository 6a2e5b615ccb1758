use thiserror::Error;

/// Everything that can go wrong between a caller and the document store. Each variant maps to
/// exactly one http status; keeping the mapping here lets handlers stay boring.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DirectoryError {
  /// A required field was missing or empty on the way in.
  #[error("missing or empty required field '{0}'")]
  Validation(&'static str),

  /// The unique `uid` index rejected a write; two first-registrations raced.
  #[error("device '{0}' was concurrently registered")]
  Conflict(String),

  /// A lookup miss.
  #[error("no device found for '{0}'")]
  NotFound(String),

  /// The storage layer failed underneath us. Fatal during startup, surfaced per-call after.
  #[error("storage failure - {0}")]
  Storage(String),
}

impl DirectoryError {
  /// The single http status each variant collapses onto.
  pub fn status(&self) -> u16 {
    match self {
      DirectoryError::Validation(_) => 422,
      DirectoryError::Conflict(_) => 409,
      DirectoryError::NotFound(_) => 404,
      DirectoryError::Storage(_) => 502,
    }
  }

  /// Classifies a failed mongo write. A duplicate-key rejection (code 11000) on our unique `uid`
  /// index means a concurrent first-insert race; anything else is a storage fault.
  pub(crate) fn from_write(uid: &str, error: mongodb::error::Error) -> Self {
    if write_error_code(&error) == Some(DUPLICATE_KEY) {
      return DirectoryError::Conflict(uid.to_string());
    }

    DirectoryError::Storage(format!("{error}"))
  }
}

/// The server-side error code mongo uses for unique index violations.
const DUPLICATE_KEY: i32 = 11000;

fn write_error_code(error: &mongodb::error::Error) -> Option<i32> {
  match error.kind.as_ref() {
    mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(write_error)) => Some(write_error.code),
    mongodb::error::ErrorKind::Command(command_error) => Some(command_error.code),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::DirectoryError;

  #[test]
  fn test_status_mapping() {
    assert_eq!(DirectoryError::Validation("uid").status(), 422);
    assert_eq!(DirectoryError::Conflict("10".to_string()).status(), 409);
    assert_eq!(DirectoryError::NotFound("10".to_string()).status(), 404);
    assert_eq!(DirectoryError::Storage("down".to_string()).status(), 502);
  }

  #[test]
  fn test_display() {
    assert_eq!(
      DirectoryError::Validation("ip").to_string(),
      "missing or empty required field 'ip'"
    );
    assert_eq!(
      DirectoryError::NotFound("10".to_string()).to_string(),
      "no device found for '10'"
    );
  }
}
