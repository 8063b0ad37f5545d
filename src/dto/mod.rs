pub mod key_gen;

pub use key_gen::{GenerateKeyBody, GenerateKeyForm};
