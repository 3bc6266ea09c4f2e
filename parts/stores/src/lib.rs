//! Stores are for loading/storing different kinds of data.
//!
//! Currently, the only store is a directory of CSV files.
//!
//! Example store backends:
//! * Files (e.g. CSV).
//! * Remote (e.g. REST).
//! * Databases.
//! * Etc.
pub mod csv;
pub mod csv_repository;

// FUTURE Ideally we want to include this module ONLY for integration tests or for unit tests
//        but when compiling for integration tests, `test` is NOT defined so we cannot use
//        just `#[cfg(test)]`
#[cfg(any(test, feature = "testing"))]
pub mod test;
