pub mod catalog;
pub mod key;

pub use catalog::{KeyRequest, KeyType, KeyTypeCatalog, DEFAULT_KEY_TYPE};
pub use key::KeyPair;
