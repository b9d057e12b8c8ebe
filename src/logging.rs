//! Logging utilities for structured tracing

use std::time::Instant;

/// Track how long a refresh (or any other operation) took and log it on drop
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    pub fn new(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        tracing::debug!(
            operation = %self.operation,
            duration_ms = self.elapsed_ms(),
            "Operation finished"
        );
    }
}

/// Log an error with structured context
pub fn log_error(operation: &str, error: &impl std::error::Error) {
    tracing::error!(
        operation = %operation,
        error = %error,
        error_kind = std::any::type_name_of_val(error),
        "Operation failed"
    );
}
