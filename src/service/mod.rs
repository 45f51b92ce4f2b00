//! Application services
//!
//! - `FahrradReadService`: id lookup and filtered search
//! - `FahrradWriteService`: validated create, update and delete
//! - `AttachmentService`: one binary attachment per bicycle

mod errors;
mod file;
mod filter;
mod read;
mod write;

pub use errors::{CreateError, FileFindError, FileSaveError, UpdateError};
pub use file::{Attachment, AttachmentService};
pub use filter::{normalize, MODEL_PATTERN_THRESHOLD};
pub use read::FahrradReadService;
pub use write::FahrradWriteService;
