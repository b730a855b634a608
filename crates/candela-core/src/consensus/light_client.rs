use crate::consensus::bls::BlsVerifier;
use crate::consensus::merkle::verify_merkle_branch;
use crate::consensus::ssz::{hash_tree_root_header, hash_tree_root_sync_committee};
use crate::consensus::sync_committee::{
    sync_committee_period, verify_sync_committee_signature, UpdateError,
};
use crate::types::beacon::*;

/// Generalized index of the finalized checkpoint root in the beacon state.
pub const FINALIZED_ROOT_GINDEX: u64 = 105;
pub const FINALIZED_ROOT_DEPTH: usize = 6;

/// Generalized index of the next sync committee in the beacon state.
pub const NEXT_SYNC_COMMITTEE_GINDEX: u64 = 55;
pub const NEXT_SYNC_COMMITTEE_DEPTH: usize = 5;

/// Initialize a light client state from a trusted checkpoint.
///
/// This is the one moment of trust in the client's lifecycle: the header and
/// committee are accepted without proof, so the caller must have vetted the
/// checkpoint out of band (see the `checkpoint` module). The only check here
/// is structural, that the committee has its full 512 members.
pub fn initialize_from_checkpoint(
    trusted_header: BeaconBlockHeader,
    trusted_committee: SyncCommittee,
    genesis_validators_root: Hash32,
) -> Result<LightClientState, UpdateError> {
    trusted_committee
        .validate()
        .map_err(|reason| UpdateError::MalformedInput {
            reason: reason.to_string(),
        })?;

    Ok(LightClientState {
        finalized_header: trusted_header,
        prev_sync_committee: trusted_committee,
        genesis_validators_root,
        latest_execution_payload_state_root: None,
    })
}

/// Process a finalized-header update, verifying every proof and advancing
/// the state.
///
/// The checks run in a fixed order, each a hard precondition for the next:
/// 1. Quorum: a two-thirds supermajority of the committee signed.
/// 2. Signature: the aggregate BLS signature of the participants, taken from
///    the committee the state already trusts, verifies over the attested
///    header's signing root.
/// 3. Finality proof: the claimed finalized header is embedded in the
///    attested header's state.
/// 4. Period adjacency: the signature slot's sync committee period is the
///    finalized period or its immediate successor.
/// 5. Committee proof: the claimed next sync committee is embedded in the
///    same attested state.
///
/// Only after all five pass does the state change, and then atomically: the
/// finalized header and the trusted committee are replaced together. On any
/// error the state is untouched.
///
/// An accepted update rotates the trusted committee, so a replay of the same
/// update fails step 2 against the new committee. Slot monotonicity needs no
/// rule of its own.
pub fn process_finalized_header_update<V: BlsVerifier>(
    state: &mut LightClientState,
    update: &FinalizedHeaderUpdate,
    bls: &V,
) -> Result<(), UpdateError> {
    // Structural boundary: the claimed next committee must be full-sized
    // before any of its 512 slots are touched.
    update
        .next_sync_committee
        .validate()
        .map_err(|reason| UpdateError::MalformedInput {
            reason: reason.to_string(),
        })?;

    // 1. Quorum
    if !update.sync_aggregate.has_supermajority() {
        return Err(UpdateError::QuorumNotMet {
            participants: update.sync_aggregate.num_participants(),
        });
    }

    // 2. Aggregate signature by the currently trusted committee
    verify_sync_committee_signature(
        &update.attested_header,
        &update.sync_aggregate,
        &state.prev_sync_committee,
        &update.fork_version,
        &state.genesis_validators_root,
        bls,
    )?;

    // 3. Finality proof against the attested state root
    let finalized_root = hash_tree_root_header(&update.finalized_header);
    if !verify_merkle_branch(
        &finalized_root,
        &update.finality_branch,
        FINALIZED_ROOT_DEPTH,
        FINALIZED_ROOT_GINDEX,
        &update.attested_header.state_root,
    ) {
        return Err(UpdateError::InvalidFinalityProof);
    }

    // 4. Period adjacency
    let signature_period = sync_committee_period(update.signature_slot);
    let finalized_period = sync_committee_period(state.finalized_header.slot);
    if signature_period != finalized_period && signature_period != finalized_period + 1 {
        return Err(UpdateError::InvalidPeriodAdjacency {
            signature_period,
            finalized_period,
        });
    }

    // 5. Next committee proof against the same attested state root
    let committee_root = hash_tree_root_sync_committee(&update.next_sync_committee);
    if !verify_merkle_branch(
        &committee_root,
        &update.next_sync_committee_branch,
        NEXT_SYNC_COMMITTEE_DEPTH,
        NEXT_SYNC_COMMITTEE_GINDEX,
        &update.attested_header.state_root,
    ) {
        return Err(UpdateError::InvalidCommitteeProof);
    }

    // All checks passed. Commit both replacements together.
    state.finalized_header = update.finalized_header.clone();
    state.prev_sync_committee = update.next_sync_committee.clone();

    Ok(())
}
