pub mod source;
pub mod store;

pub use source::EventSource;
pub use store::EntityStore;
