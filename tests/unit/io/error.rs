//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use pipeflow::PipeflowError;
    use pipeflow::io::error::{ErrorContext, WithContext, file_system, invalid_parameter};
    use pipeflow::spatial::grid::Cell;
    use std::error::Error;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = file_system("/tmp/progress.txt", "read store", io_error);
        assert!(error.source().is_some());
        assert!(error.to_string().contains("/tmp/progress.txt"));
        assert!(PipeflowError::UnsolvableGrid { attempt: 1 }.source().is_none());
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("width", &2, &"must be between 3 and 64");
        let message = error.to_string();
        assert!(message.contains("width"));
        assert!(message.contains("'2'"));
        assert!(message.contains("between 3 and 64"));
    }

    // Tests messages name the attempt and cell involved
    // Verified by omitting the attempt from the message
    #[test]
    fn test_generation_error_messages() {
        assert!(
            PipeflowError::UnsolvableGrid { attempt: 3 }
                .to_string()
                .contains("attempt 3")
        );
        assert!(
            PipeflowError::MissingArchetypeMapping {
                cell: Cell::new(2, 5)
            }
            .to_string()
            .contains("(2, 5)")
        );
        let persistence = PipeflowError::Persistence {
            key: "level".to_string(),
            reason: "bad".to_string(),
        };
        assert!(persistence.to_string().contains("'level'"));
    }

    // Tests that an attempt context leaves other errors alone
    // Verified by overwriting every variant in with_context
    #[test]
    fn test_attempt_context_ignores_other_errors() {
        let result: Result<(), PipeflowError> = Err(invalid_parameter("height", &1, &"too small"));
        let context = ErrorContext {
            attempt: Some(2),
            ..ErrorContext::default()
        };
        let error = result.with_context(context).err();
        assert!(matches!(
            error,
            Some(PipeflowError::InvalidParameter { parameter: "height", .. })
        ));
    }

    // Tests conversion from io::Error
    // Verified by mapping io errors to InvalidParameter
    #[test]
    fn test_from_io_error() {
        let error: PipeflowError = std::io::Error::other("disk full").into();
        assert!(matches!(error, PipeflowError::FileSystem { .. }));
    }
}
