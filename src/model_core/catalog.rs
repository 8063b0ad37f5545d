use std::fmt;

use lazy_static::lazy_static;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    Rsa,
    Dsa,
    Ecdsa,
    Ed25519,
}

impl KeyType {
    pub const ALL: [KeyType; 4] = [KeyType::Rsa, KeyType::Dsa, KeyType::Ecdsa, KeyType::Ed25519];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Rsa => "rsa",
            KeyType::Dsa => "dsa",
            KeyType::Ecdsa => "ecdsa",
            KeyType::Ed25519 => "ed25519",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            KeyType::Rsa => "RSA",
            KeyType::Dsa => "DSA",
            KeyType::Ecdsa => "ECDSA",
            KeyType::Ed25519 => "ED25519",
        }
    }

    /// Exact, case-sensitive match on the wire name.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key_type| key_type.as_str() == raw)
    }

    fn index(&self) -> usize {
        match self {
            KeyType::Rsa => 0,
            KeyType::Dsa => 1,
            KeyType::Ecdsa => 2,
            KeyType::Ed25519 => 3,
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_KEY_TYPE: KeyType = KeyType::Ed25519;

const RSA_SIZES: &[u32] = &[4096, 2048, 1024];
const DSA_SIZES: &[u32] = &[1024];
const ECDSA_SIZES: &[u32] = &[521, 384, 256];
const ED25519_SIZES: &[u32] = &[512, 256];

lazy_static! {
    static ref KEY_TYPE_CATALOG: KeyTypeCatalog = KeyTypeCatalog::standard();
}

/// Permitted bit sizes per key type. The first size of each list is the
/// default for that type.
#[derive(Debug)]
pub struct KeyTypeCatalog {
    sizes: [&'static [u32]; 4],
}

impl KeyTypeCatalog {
    fn standard() -> Self {
        let mut sizes: [&'static [u32]; 4] = [&[]; 4];
        sizes[KeyType::Rsa.index()] = RSA_SIZES;
        sizes[KeyType::Dsa.index()] = DSA_SIZES;
        sizes[KeyType::Ecdsa.index()] = ECDSA_SIZES;
        sizes[KeyType::Ed25519.index()] = ED25519_SIZES;
        Self { sizes }
    }

    pub fn global() -> &'static KeyTypeCatalog {
        &KEY_TYPE_CATALOG
    }

    pub fn sizes(&self, key_type: KeyType) -> &'static [u32] {
        self.sizes[key_type.index()]
    }

    pub fn default_size(&self, key_type: KeyType) -> u32 {
        // every list is non-empty
        self.sizes(key_type)[0]
    }

    pub fn permits(&self, key_type: KeyType, size: u32) -> bool {
        self.sizes(key_type).contains(&size)
    }

    pub fn iter(&self) -> impl Iterator<Item = (KeyType, &'static [u32])> + '_ {
        KeyType::ALL.into_iter().map(|key_type| (key_type, self.sizes(key_type)))
    }

    /// Resolves untrusted input to a valid request. Unknown types fall back to
    /// ed25519 and sizes outside the type's list fall back to its default.
    pub fn normalize(&self, raw_type: Option<&str>, raw_size: Option<&str>) -> KeyRequest {
        let key_type = raw_type.and_then(KeyType::parse).unwrap_or(DEFAULT_KEY_TYPE);

        let size = raw_size
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|size| self.permits(key_type, *size))
            .unwrap_or_else(|| self.default_size(key_type));

        KeyRequest { key_type, size }
    }
}

impl Serialize for KeyTypeCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(KeyType::ALL.len()))?;
        for (key_type, sizes) in self.iter() {
            map.serialize_entry(key_type.as_str(), sizes)?;
        }
        map.end()
    }
}

/// A type/size pair that is always present in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyRequest {
    #[serde(rename = "type")]
    key_type: KeyType,
    size: u32,
}

impl KeyRequest {
    pub fn normalize(raw_type: Option<&str>, raw_size: Option<&str>) -> Self {
        KeyTypeCatalog::global().normalize(raw_type, raw_size)
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}

impl Default for KeyRequest {
    fn default() -> Self {
        Self::normalize(None, None)
    }
}
