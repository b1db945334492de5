//! # Domain Errors
//!
//! Error types for the Block Storage subsystem.

use std::fmt;

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Database I/O error.
    DatabaseError { message: String },

    /// Serialization/deserialization error.
    SerializationError { message: String },

    /// A stored record does not decode.
    CorruptRecord { record: &'static str, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::DatabaseError { message } => {
                write!(f, "Database error: {}", message)
            }
            StorageError::SerializationError { message } => {
                write!(f, "Serialization error: {}", message)
            }
            StorageError::CorruptRecord { record, message } => {
                write!(f, "Corrupt {} record: {}", record, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Key-value store errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KVStoreError {
    /// I/O error during read/write.
    IOError { message: String },
    /// Data corruption in the store.
    CorruptionError { message: String },
}

impl fmt::Display for KVStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KVStoreError::IOError { message } => write!(f, "KV store I/O error: {}", message),
            KVStoreError::CorruptionError { message } => {
                write!(f, "KV store corruption: {}", message)
            }
        }
    }
}

impl std::error::Error for KVStoreError {}

impl From<KVStoreError> for StorageError {
    fn from(err: KVStoreError) -> Self {
        StorageError::DatabaseError {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for KVStoreError {
    fn from(err: std::io::Error) -> Self {
        KVStoreError::IOError {
            message: err.to_string(),
        }
    }
}
