//! Unit tests for crate-level error types

#[cfg(test)]
mod tests {
    use crate::RefileError;
    use crate::methods::{MethodError, NameTransform};
    use crate::presets::PresetError;
    use std::error::Error;

    #[test]
    fn test_method_error_converts() {
        let method_err = NameTransform::try_from("shuffle").unwrap_err();
        let err: RefileError = method_err.into();
        assert!(matches!(err, RefileError::Method(MethodError::UnknownMethod(_))));
        assert_eq!(err.to_string(), "Method error: Unknown method: shuffle");
    }

    #[test]
    fn test_preset_error_converts() {
        let err: RefileError = PresetError::NotFound("photos".into()).into();
        assert_eq!(err.to_string(), "Preset error: Preset not found: photos");
    }

    #[test]
    fn test_thread_spawn_keeps_source() {
        let err = RefileError::ThreadSpawn(std::io::Error::other("no threads"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("no threads"));
    }

    #[test]
    fn test_invalid_regex_source_chain() {
        let method_err = crate::pipeline::MethodPipeline::new(vec![NameTransform::regex("(", "")])
            .unwrap_err();
        let err = RefileError::from(method_err);
        assert!(err.to_string().starts_with("Method error: Invalid regex pattern '('"));
    }

    #[test]
    fn test_worker_panicked_display() {
        assert_eq!(
            RefileError::WorkerPanicked.to_string(),
            "Batch worker terminated unexpectedly"
        );
    }
}
