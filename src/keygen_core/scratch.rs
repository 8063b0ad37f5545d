use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use rand::{rngs::OsRng, RngCore};

pub const PUBLIC_KEY_SUFFIX: &str = ".pub";

// 128 bits
const SCRATCH_ID_BYTES: usize = 16;

/// Random, hex encoded token naming one request's scratch files.
pub fn scratch_id() -> String {
    let mut bytes = [0u8; SCRATCH_ID_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// The private and public key paths of a single generation. Both files are
/// removed when this value is dropped, whatever happened in between.
#[derive(Debug)]
pub struct ScratchFiles {
    id: String,
    private_key: PathBuf,
    public_key: PathBuf,
}

impl ScratchFiles {
    pub fn new(dir: &Path) -> Self {
        let id = scratch_id();
        let private_key = dir.join(&id);
        let public_key = dir.join(format!("{id}{PUBLIC_KEY_SUFFIX}"));
        Self {
            id,
            private_key,
            public_key,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn private_key_path(&self) -> &Path {
        &self.private_key
    }

    pub fn public_key_path(&self) -> &Path {
        &self.public_key
    }
}

impl Drop for ScratchFiles {
    fn drop(&mut self) {
        // plain unlinks, short enough to run on the async worker
        for path in [&self.private_key, &self.public_key] {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => warn!("Failed to remove scratch file {}: {}", path.display(), e),
            }
        }
    }
}
