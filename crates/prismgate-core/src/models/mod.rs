//! Domain models shared across the gateway components.

pub mod batch;
pub mod result;
pub mod session;

pub use batch::{BatchFile, SortOrder};
pub use result::{PhotoRecord, UploadAccepted, UploadResult};
pub use session::Session;
