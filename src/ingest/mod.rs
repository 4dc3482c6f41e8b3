// Ingest module
// Wire types for producers and JSON Lines replay

mod replay;
mod request;

pub use replay::{replay_events, replay_file};
pub use request::{LogRequest, RecordRequest};
