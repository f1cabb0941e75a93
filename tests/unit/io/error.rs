//! Tests for error display and source chaining

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::PathBuf;
    use wavetile::SynthesisError;
    use wavetile::io::error::{invalid_input, invalid_parameter};

    #[test]
    fn test_invalid_input_display() {
        let error = invalid_input(&"tile size 5 exceeds exemplar dimensions 4x4");
        assert_eq!(
            error.to_string(),
            "Unusable input: tile size 5 exceeds exemplar dimensions 4x4"
        );
        assert!(error.source().is_none());
    }

    #[test]
    fn test_invalid_parameter_display() {
        let error = invalid_parameter("width", &20_000, &"must not exceed 10000");
        assert_eq!(
            error.to_string(),
            "width = 20000 rejected: must not exceed 10000"
        );
    }

    // Tests the contradiction message names the cell and restart count
    #[test]
    fn test_contradiction_display() {
        let error = SynthesisError::Contradiction {
            cell: [3, 7],
            restarts: 12,
        };
        assert_eq!(
            error.to_string(),
            "Contradiction at cell (3, 7) after 12 restarts"
        );
    }

    // Tests I/O errors keep their source
    // Verified by source() returning the wrapped io::Error
    #[test]
    fn test_file_system_source() {
        let error = SynthesisError::FileSystem {
            path: PathBuf::from("out.png"),
            operation: "create output file",
            source: std::io::Error::new(std::io::ErrorKind::AlreadyExists, "exists"),
        };
        assert!(error.to_string().contains("create output file"));
        assert!(error.to_string().contains("out.png"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_from_io_error() {
        let error: SynthesisError = std::io::Error::other("boom").into();
        assert!(matches!(error, SynthesisError::FileSystem { .. }));
    }
}
