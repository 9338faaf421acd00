use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A stored enumeration column holds a value no variant matches.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to parse {column} value '{value}'")]
    ParseEnum {
        /// The column the value was read from
        column: &'static str,
        /// The stored value
        value: String,
    },

    /// Hashing a password failed.
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),

    /// A calendar computation fell outside chrono's supported range.
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
}
