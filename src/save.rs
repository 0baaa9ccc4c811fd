#![cfg(feature = "std")]
//! Versioned save/load of a [`GameSession`].
//!
//! Snapshots are written field by field through serde, never as raw struct
//! memory: a four byte magic, a little-endian schema version, then the
//! bincode body. Loading validates all three layers and leaves the caller's
//! in-memory session untouched on any failure.

use std::fmt;

use crate::game::GameSession;

/// Leading bytes of every snapshot.
pub const SAVE_MAGIC: [u8; 4] = *b"BRDS";
/// Current snapshot schema version.
pub const SAVE_VERSION: u16 = 1;

const HEADER_LEN: usize = SAVE_MAGIC.len() + 2;

/// Why a snapshot could not be written or read back.
#[derive(Debug)]
pub enum SaveError {
    /// Too short to even hold the header.
    Truncated,
    /// Leading bytes are not a snapshot.
    BadMagic,
    /// Written by an unknown schema version.
    UnsupportedVersion(u16),
    /// Body failed to encode or decode.
    Codec(bincode::Error),
    /// Body decoded but violates board invariants.
    Corrupt,
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Truncated => write!(f, "snapshot shorter than its header"),
            SaveError::BadMagic => write!(f, "not a game snapshot"),
            SaveError::UnsupportedVersion(v) => write!(f, "unsupported snapshot version {}", v),
            SaveError::Codec(e) => write!(f, "snapshot codec error: {}", e),
            SaveError::Corrupt => write!(f, "snapshot violates game invariants"),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Codec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<bincode::Error> for SaveError {
    fn from(err: bincode::Error) -> Self {
        SaveError::Codec(err)
    }
}

/// Serialize `session` into a self-describing snapshot.
pub fn save(session: &GameSession) -> Result<Vec<u8>, SaveError> {
    let body = bincode::serialize(session)?;
    let mut out = Vec::with_capacity(HEADER_LEN + body.len());
    out.extend_from_slice(&SAVE_MAGIC);
    out.extend_from_slice(&SAVE_VERSION.to_le_bytes());
    out.extend_from_slice(&body);
    Ok(out)
}

/// Restore a session from snapshot bytes.
pub fn load(bytes: &[u8]) -> Result<GameSession, SaveError> {
    if bytes.len() < HEADER_LEN {
        return Err(SaveError::Truncated);
    }
    if bytes[..4] != SAVE_MAGIC {
        return Err(SaveError::BadMagic);
    }
    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != SAVE_VERSION {
        return Err(SaveError::UnsupportedVersion(version));
    }
    let session: GameSession = bincode::deserialize(&bytes[HEADER_LEN..])?;
    if !session.is_consistent() {
        return Err(SaveError::Corrupt);
    }
    Ok(session)
}
