pub mod metadata;
pub mod validity;

pub use metadata::{CommandMetadata, CommandMetadataBuilder};
pub use validity::Validity;
