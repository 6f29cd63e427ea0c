//! Configuration for the search engine client.

use std::time::Duration;

/// Per-operation timeouts for search engine calls.
///
/// Each operation class has its own bound so a slow index creation (analyzer
/// setup is not free) does not inflate the budget for the cheap existence
/// check. An elapsed timeout is reported as that operation's failure and is
/// never retried here.
#[derive(Debug, Clone)]
pub struct SearchClientConfig {
    /// Timeout for index-exists checks.
    pub exists_timeout: Duration,
    /// Timeout for index and template creation.
    pub create_timeout: Duration,
    /// Timeout for document writes.
    pub write_timeout: Duration,
}

impl Default for SearchClientConfig {
    fn default() -> Self {
        Self {
            exists_timeout: Duration::from_secs(5),
            create_timeout: Duration::from_secs(30),
            write_timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts_are_independent() {
        let config = SearchClientConfig::default();
        assert!(config.exists_timeout < config.create_timeout);
        assert!(config.write_timeout > Duration::ZERO);
    }
}
