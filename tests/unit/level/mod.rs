//! Level unit tests
