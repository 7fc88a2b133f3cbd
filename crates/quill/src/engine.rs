mod association;
mod deep_search;
mod exec;
mod integrity;
pub use integrity::Violation;
mod read;
mod write;
