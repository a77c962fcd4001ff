pub mod host;
pub mod range;
pub mod scope;
