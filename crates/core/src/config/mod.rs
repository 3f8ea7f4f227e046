//! Global Git configuration discovery and mutation.

pub mod locator;
pub mod writer;

pub use locator::ConfigurationLocator;
pub use writer::ConfigurationWriter;
