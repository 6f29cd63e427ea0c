//! Consumer-side types for the regintel indexer ingest.
//!
//! The event transport itself (delivery, redelivery, ordering) is an
//! external collaborator; this module only defines the payload shapes it
//! hands us.

mod messages;

pub use messages::{EventDetail, IngestEvent};
