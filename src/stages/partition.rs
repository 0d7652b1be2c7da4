use std::collections::HashMap;

use tracing::warn;

use crate::cancel::CancellationToken;
use crate::models::{Block, Take, TakeConfig};

/// Lexicographic partition cost: `(sum of distinct-speaker counts across
/// takes, number of takes)`. Both components are additive across takes, so
/// the DP below can accumulate them incrementally.
type Cost = (usize, usize);

fn distinct_speaker_count(block: &Block) -> usize {
    let mut speakers: Vec<&str> = block.interventions.iter().map(|iv| iv.speaker.as_str()).collect();
    speakers.sort_unstable();
    speakers.dedup();
    speakers.len()
}

/// Partitions one scene's blocks into takes that minimize [`Cost`],
/// preferring the scene's earliest-found optimum on ties.
///
/// Returns `None` if `cancel` fires before the optimization completes; a
/// cancelled partition never yields a partial result. Blocks so large on
/// their own that no configured constraint can be satisfied still get a
/// take, a degenerate, single-block one, rather than failing the scene.
pub fn partition_scene(
    scene: &str,
    blocks: &[Block],
    config: &TakeConfig,
    cancel: &CancellationToken,
) -> Option<Vec<Take>> {
    let n = blocks.len();
    if n == 0 {
        return Some(Vec::new());
    }

    let mut dp_cost: Vec<Cost> = vec![(0, 0); n + 1];
    let mut dp_next_end: Vec<usize> = vec![0; n];

    for pos in (0..n).rev() {
        if cancel.is_cancelled() {
            return None;
        }

        let first_in = blocks[pos].in_s();
        let mut line_count = 0usize;
        let mut speaker_totals: HashMap<&str, usize> = HashMap::new();
        let mut consec_speaker: Option<&str> = None;
        let mut consec_len = 0usize;
        let mut consec_violation = false;
        let mut total_violation = false;

        let mut best: Option<(Cost, usize)> = None;

        for end in pos..n {
            if cancel.is_cancelled() {
                return None;
            }

            let block = &blocks[end];
            for iv in &block.interventions {
                if consec_speaker == Some(iv.speaker.as_str()) {
                    consec_len += 1;
                } else {
                    consec_speaker = Some(iv.speaker.as_str());
                    consec_len = 1;
                }
                if consec_len > config.max_consecutive_lines_per_speaker {
                    consec_violation = true;
                }

                let total = speaker_totals.entry(iv.speaker.as_str()).or_insert(0);
                *total += 1;
                if *total > config.max_total_lines_per_speaker_in_take {
                    total_violation = true;
                }
            }
            line_count += block.len();

            let duration = block.out_s() - first_in;
            if duration > config.max_take_duration_seconds
                || line_count > config.max_lines_per_take
                || total_violation
            {
                break;
            }

            if consec_violation {
                continue;
            }

            let rest = dp_cost[end + 1];
            let candidate: Cost = (speaker_totals.len() + rest.0, 1 + rest.1);
            match best {
                Some((best_cost, _)) if candidate >= best_cost => {}
                _ => best = Some((candidate, end + 1)),
            }
        }

        match best {
            Some((cost, next_end)) => {
                dp_cost[pos] = cost;
                dp_next_end[pos] = next_end;
            }
            None => {
                warn!(
                    scene,
                    block = pos,
                    "no feasible take boundary found; emitting a degenerate single-block take"
                );
                let rest = dp_cost[pos + 1];
                dp_cost[pos] = (distinct_speaker_count(&blocks[pos]) + rest.0, 1 + rest.1);
                dp_next_end[pos] = pos + 1;
            }
        }
    }

    let mut takes = Vec::new();
    let mut pos = 0;
    while pos < n {
        let end = dp_next_end[pos];
        let interventions: Vec<_> = blocks[pos..end]
            .iter()
            .flat_map(|b| b.interventions.iter().cloned())
            .collect();
        takes.push(Take {
            take_number: 0,
            scene: scene.to_string(),
            in_s: blocks[pos].in_s(),
            out_s: blocks[end - 1].out_s(),
            interventions,
        });
        pos = end;
    }

    Some(takes)
}
