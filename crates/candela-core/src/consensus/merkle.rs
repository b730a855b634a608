use crate::consensus::ssz::hash_pair;
use crate::types::beacon::Hash32;

/// Verify a Merkle branch (SSZ proof) against an expected root.
///
/// `index` is the generalized index of the leaf in the SSZ tree; bit `i`
/// of it says whether the branch node at depth `i` is a left sibling.
/// A branch whose length differs from `depth` fails before any hashing.
pub fn verify_merkle_branch(
    leaf: &Hash32,
    branch: &[Hash32],
    depth: usize,
    index: u64,
    root: &Hash32,
) -> bool {
    if branch.len() != depth {
        return false;
    }

    let mut current = *leaf;
    for (i, sibling) in branch.iter().enumerate() {
        if (index >> i) & 1 == 1 {
            current = hash_pair(sibling, &current);
        } else {
            current = hash_pair(&current, sibling);
        }
    }

    current == *root
}
