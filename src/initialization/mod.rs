//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - Logger (plain or JSON)
//! - Resolver backends in priority order
//! - Concurrency semaphore for the worker pool

mod logger;
mod resolver;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::init_backends;

/// Initializes a semaphore for controlling concurrency.
///
/// Each in-flight domain holds one permit, so `count` is the worker count.
///
/// # Arguments
///
/// * `count` - Maximum number of domains resolved at once
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_semaphore_permits() {
        let semaphore = init_semaphore(3);
        assert_eq!(semaphore.available_permits(), 3);
    }
}
