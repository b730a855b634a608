use crate::consensus::ssz::hash_tree_root_header;
use crate::types::beacon::{BeaconBlockHeader, Hash32};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during checkpoint operations.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Insufficient checkpoint agreement: {agreeing}/{total} sources agree, need {required}")]
    InsufficientAgreement {
        agreeing: usize,
        total: usize,
        required: usize,
    },

    #[error("No checkpoint sources provided")]
    NoSources,

    #[error("Checkpoint root format invalid: {reason}")]
    InvalidFormat { reason: String },
}

/// A finalized block root reported by one checkpoint provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointSource {
    /// The finalized block root the provider reports.
    pub block_root: Hash32,
    /// The slot the provider says that root finalizes.
    pub slot: u64,
}

/// A checkpoint that enough independent sources agreed on.
///
/// This is the one moment of soft trust in the client's lifecycle: we trust
/// that N independent operators will not all collude on a fake checkpoint.
/// Past this point, every accepted header is backed by proofs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgreedCheckpoint {
    /// The block root the sources agreed on.
    pub block_root: Hash32,
    /// The slot of the agreed checkpoint.
    pub slot: u64,
    /// How many sources agreed on this root.
    pub source_agreement: usize,
    /// Total number of sources consulted.
    pub total_sources: usize,
}

impl AgreedCheckpoint {
    /// Check a candidate trusted header against the agreed root, before the
    /// header is allowed to seed the light client state.
    pub fn matches_header(&self, header: &BeaconBlockHeader) -> bool {
        self.slot == header.slot && self.block_root == hash_tree_root_header(header)
    }
}

/// Find the block root that at least `required` of the given sources report.
pub fn agree_on_checkpoint(
    sources: &[CheckpointSource],
    required: usize,
) -> Result<AgreedCheckpoint, CheckpointError> {
    if sources.is_empty() {
        return Err(CheckpointError::NoSources);
    }

    // A zero requirement would accept anything; treat it as a caller bug
    if required == 0 {
        return Err(CheckpointError::InsufficientAgreement {
            agreeing: 0,
            total: sources.len(),
            required,
        });
    }

    // Tally agreement per distinct block root
    let mut tallies: Vec<(Hash32, u64, usize)> = Vec::new();
    for source in sources {
        match tallies
            .iter_mut()
            .find(|(root, _, _)| *root == source.block_root)
        {
            Some((_, _, count)) => *count += 1,
            None => tallies.push((source.block_root, source.slot, 1)),
        }
    }

    // Non-empty input means at least one tally entry
    let (block_root, slot, agreeing) = match tallies.iter().max_by_key(|(_, _, count)| *count) {
        Some(&best) => best,
        None => return Err(CheckpointError::NoSources),
    };

    if agreeing < required {
        return Err(CheckpointError::InsufficientAgreement {
            agreeing,
            total: sources.len(),
            required,
        });
    }

    Ok(AgreedCheckpoint {
        block_root,
        slot,
        source_agreement: agreeing,
        total_sources: sources.len(),
    })
}

/// Parse a hex-encoded checkpoint block root.
pub fn parse_checkpoint_root(hex_str: &str) -> Result<Hash32, CheckpointError> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);

    if hex_str.len() != 64 {
        return Err(CheckpointError::InvalidFormat {
            reason: format!("Expected 64 hex characters, got {}", hex_str.len()),
        });
    }

    let bytes = hex::decode(hex_str).map_err(|e| CheckpointError::InvalidFormat {
        reason: format!("Invalid hex: {}", e),
    })?;

    let mut root = [0u8; 32];
    root.copy_from_slice(&bytes);
    Ok(root)
}
