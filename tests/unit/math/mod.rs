//! Math unit tests
