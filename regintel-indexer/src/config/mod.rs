//! Configuration for the regintel indexer binary.

mod dependencies;

pub use dependencies::Dependencies;
