//! nfd-lookup-ffi - foreign-function surfaces for nfd-lookup
//!
//! - [`plugin`] - `extern "C"` exports for generic plugin loaders
//! - [`report`] - routing of failures to the host's error channel
//! - `pg` - Postgres extension functions and the `algoaddr` type (feature `pg`)

#![deny(unsafe_op_in_unsafe_fn)]

pub mod error;
pub mod plugin;
pub mod report;

#[cfg(feature = "pg")]
pub mod pg;

pub use error::FfiError;

/// Hooks `cargo pgrx test` calls before starting the test cluster.
#[cfg(all(test, feature = "pg_test"))]
pub mod pg_test {
    pub fn setup(_options: Vec<&str>) {}

    pub fn postgresql_conf_options() -> Vec<&'static str> {
        vec![]
    }
}
