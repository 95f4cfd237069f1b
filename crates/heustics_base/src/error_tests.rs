/* 📖 # Why use a separate file for these error tests?

Some of these tests look at span traces, which contain source locations.
Keeping them apart from the error module stops unrelated edits there from shifting them.
*/

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::{HeusticsError, HeusticsResult, ResultExt};
    use expect_test::expect;
    use std::error::Error;
    use std::io;
    use std::path::PathBuf;
    use tracing::{span, warn_span};
    use tracing_error::ErrorLayer;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    /// SpanTrace::capture() needs an ErrorLayer subscriber to record anything.
    /// `try_init()` tolerates other tests having installed it already.
    fn setup_tracing_subscriber() {
        let _ = tracing_subscriber::registry()
            .with(ErrorLayer::default())
            .try_init();
    }

    #[test]
    fn test_error_from_file_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let path = PathBuf::from("files.json");
        let error = HeusticsError::new(ErrorKind::FileError {
            path: path.clone(),
            source: io_err,
        });

        match error.kind() {
            ErrorKind::FileError { path: p, .. } => assert_eq!(p, &path),
            _ => panic!("Expected FileError variant"),
        }
    }

    #[test]
    fn test_error_context_attachment() {
        let error = HeusticsError::message("original error")
            .context("first context")
            .context("second context");

        assert_eq!(error.get_context(), ["first context", "second context"]);
    }

    #[test]
    fn test_error_with_context_lazy_evaluation() {
        let mut called = false;
        let error = HeusticsError::message("error").with_context(|| {
            called = true;
            "lazy context".to_string()
        });

        assert!(called);
        assert_eq!(error.get_context()[0], "lazy context");
    }

    #[test]
    fn test_error_display_with_multiple_contexts() {
        let error = HeusticsError::message("root error")
            .context("first")
            .context("second")
            .context("third");
        assert_eq!(error.to_string(), "first: second: third: root error");
    }

    #[test]
    fn test_error_display_file_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
        let error = HeusticsError::new(ErrorKind::FileError {
            path: PathBuf::from("/tmp/files.json"),
            source: io_err,
        });
        let display = error.to_string();
        assert!(display.contains("/tmp/files.json"));
        assert!(display.contains("not found"));
    }

    #[test]
    fn test_error_display_command_error() {
        let error = HeusticsError::new(ErrorKind::CommandError {
            command: "go list ./...".to_string(),
            status: Some(1),
            stderr: "no Go files\n".to_string(),
        });
        assert_eq!(
            error.to_string(),
            "Command 'go list ./...' exited with status 1: no Go files"
        );
    }

    #[test]
    fn test_error_display_command_error_without_status() {
        let error = HeusticsError::new(ErrorKind::CommandError {
            command: "go version".to_string(),
            status: None,
            stderr: String::new(),
        });
        assert_eq!(error.to_string(), "Command 'go version' failed");
    }

    #[test]
    fn test_error_source_file_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error = HeusticsError::new(ErrorKind::FileError {
            path: PathBuf::from("test.txt"),
            source: io_err,
        });
        assert_eq!(error.source().unwrap().to_string(), "access denied");
    }

    #[test]
    fn test_error_source_message() {
        let error = HeusticsError::message("test");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_result_ext_context_success() {
        let result: HeusticsResult<i32> = Ok(42);
        assert_eq!(result.context("operation failed").unwrap(), 42);
    }

    #[test]
    fn test_result_ext_chaining() {
        let result: HeusticsResult<i32> = Err(Box::new(HeusticsError::message("root")));
        let err = result
            .context("step 1")
            .context("step 2")
            .with_context(|| "step 3".to_string())
            .unwrap_err();
        assert_eq!(err.to_string(), "step 1: step 2: step 3: root");
    }

    #[test]
    fn test_err_macro_formats_message() {
        let error = crate::err!("bad shard count {}", 0);
        assert_eq!(error.to_string(), "bad shard count 0");
    }

    #[test]
    fn test_bail_macro_returns_early() {
        fn check(value: usize) -> HeusticsResult<usize> {
            if value == 0 {
                crate::bail!("value must be positive");
            }
            Ok(value)
        }
        assert_eq!(check(3).unwrap(), 3);
        assert_eq!(check(0).unwrap_err().to_string(), "value must be positive");
    }

    #[test]
    fn test_debug_pretty_print_format() {
        let error = HeusticsError::message("something went wrong")
            .context("while reading files.json")
            .context("in dirty package search");

        expect![[r#"
            something went wrong
            ├─ while reading files.json
            └─ in dirty package search
        "#]]
        .assert_eq(&format!("{:?}", error));
    }

    #[test]
    fn test_spantrace_is_captured_inside_span() {
        setup_tracing_subscriber();

        let operation_span = span!(tracing::Level::DEBUG, "shard_packages", shards = 4);
        let _guard = operation_span.enter();
        let outer_span = warn_span!("write_shard");
        let _outer_guard = outer_span.enter();

        let error = HeusticsError::message("disk full");
        let debug = format!("{:?}", error);

        assert!(debug.starts_with("disk full\nTrace: "));
        assert!(debug.contains("write_shard"));
        assert!(debug.contains("shard_packages"));
        assert!(debug.contains("with shards=4"));
    }

    #[test]
    fn test_spantrace_absent_outside_span() {
        setup_tracing_subscriber();

        let error = HeusticsError::message("no span here");
        assert_eq!(format!("{:?}", error), "no span here\n");
    }
}
