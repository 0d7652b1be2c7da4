use crate::models::{Block, Intervention};

/// Groups a scene's already-sorted interventions into indivisible blocks:
/// consecutive runs sharing the same `(in_s, out_s)` pair.
///
/// Equality on the pair is exact rather than epsilon-based: both fields
/// always come from `parse_timecode` applied to identical raw strings within
/// a scene, so matching instants are bit-identical.
pub fn group_blocks(interventions: Vec<Intervention>) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();

    for iv in interventions {
        match blocks.last_mut() {
            Some(block) if block.in_s() == iv.in_s && block.out_s() == iv.out_s => {
                block.interventions.push(iv);
            }
            _ => blocks.push(Block {
                interventions: vec![iv],
            }),
        }
    }

    blocks
}
