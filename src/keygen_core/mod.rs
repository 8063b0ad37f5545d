pub mod scratch;
pub mod ssh_keygen;

pub use scratch::{scratch_id, ScratchFiles, PUBLIC_KEY_SUFFIX};
pub use ssh_keygen::{keygen_args, SshKeygen};
