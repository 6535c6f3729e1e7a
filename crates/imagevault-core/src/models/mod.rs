pub mod file;
pub mod store;

pub use file::FileRecord;
pub use store::{AccessPolicy, Dimensions, StoreDefinition, VariantSpec};
