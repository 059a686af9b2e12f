// ⚠️ Error Kinds - closed set of failures every record operation can produce
//
// The shell matches on these one by one; there is no catch-all.

use std::path::PathBuf;

/// Every failure a collection manager, entity, or console prompt can report.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Unparsable number, unknown variant, unknown status, bad date...
    #[error("entrada no válida: {0}")]
    InvalidInput(String),

    /// No record matches the given key.
    #[error("registro no encontrado: {0}")]
    NotFound(String),

    /// Positional address outside the collection.
    #[error("índice {index} fuera de rango (hay {len} registros)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Withdrawal exceeds what the account rules allow.
    #[error("fondos insuficientes: se pidieron ${requested}, disponible ${available}")]
    InsufficientFunds { requested: f64, available: f64 },

    /// File missing, unreadable, or unwritable.
    #[error("error de archivo {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File read fine but is not a JSON array.
    #[error("JSON mal formado en {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Input stream ended while a prompt was waiting.
    #[error("la entrada se cerró")]
    InputClosed,
}

impl RecordError {
    pub fn invalid(message: impl Into<String>) -> Self {
        RecordError::InvalidInput(message.into())
    }

    /// True for the two file-level kinds (missing/unreadable file, bad JSON).
    pub fn is_io_failure(&self) -> bool {
        matches!(self, RecordError::Io { .. } | RecordError::Malformed { .. })
    }
}

pub type Result<T> = std::result::Result<T, RecordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_display() {
        let err = RecordError::IndexOutOfRange { index: 5, len: 3 };
        assert_eq!(err.to_string(), "índice 5 fuera de rango (hay 3 registros)");
    }

    #[test]
    fn test_insufficient_funds_display() {
        let err = RecordError::InsufficientFunds {
            requested: 150.0,
            available: 100.0,
        };
        assert!(err.to_string().contains("150"));
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn test_io_failure_classification() {
        let io = RecordError::Io {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(io.is_io_failure());
        assert!(io.to_string().contains("missing.json"));

        assert!(!RecordError::invalid("x").is_io_failure());
        assert!(!RecordError::InputClosed.is_io_failure());
    }
}
