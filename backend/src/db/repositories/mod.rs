//! Store implementations.

#[cfg(feature = "local-repo")]
pub mod local;

#[cfg(feature = "delta-repo")]
pub mod delta;

#[cfg(feature = "local-repo")]
pub use local::LocalStore;

#[cfg(feature = "delta-repo")]
pub use delta::DeltaDirStore;
