use rayon::prelude::*;

use crate::cancel::CancellationToken;
use crate::models::{SpeakerSummary, TakeConfig, Take};
use crate::stages::{assemble_takes, group_blocks, normalize, partition_scene, RawRow};

pub struct PipelineResult {
    pub takes: Vec<Take>,
    pub summary: SpeakerSummary,
}

/// Runs the full normalize -> block -> partition -> assemble pipeline,
/// partitioning scenes in parallel.
///
/// Returns `None` if `cancel` fires before every scene's partition
/// completes; like the per-scene partitioner it wraps, a cancelled run never
/// yields a partial result.
pub fn run_pipeline(
    rows: Vec<RawRow>,
    speaker_filter: Option<&[String]>,
    config: &TakeConfig,
    cancel: &CancellationToken,
) -> Option<PipelineResult> {
    let scenes = normalize(rows, speaker_filter, config);

    let scene_takes: Option<Vec<Vec<Take>>> = scenes
        .into_par_iter()
        .map(|(scene, interventions)| {
            let blocks = group_blocks(interventions);
            partition_scene(&scene, &blocks, config, cancel)
        })
        .collect();

    let scene_takes = scene_takes?;
    let (takes, summary) = assemble_takes(scene_takes);

    Some(PipelineResult { takes, summary })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(in_raw: &str, out_raw: &str, speaker: &str, dialogue: &str, scene: &str) -> RawRow {
        RawRow {
            in_raw: in_raw.to_string(),
            out_raw: out_raw.to_string(),
            speaker: speaker.to_string(),
            dialogue: dialogue.to_string(),
            scene: scene.to_string(),
        }
    }

    #[test]
    fn end_to_end_produces_numbered_takes_and_a_summary() {
        let rows = vec![
            row("00:00:00:00", "00:00:01:00", "ANA", "hola", "1"),
            row("00:00:01:00", "00:00:02:00", "LUIS", "que tal", "1"),
            row("00:00:00:00", "00:00:01:00", "ANA", "hey", "2"),
        ];
        let config = TakeConfig::default();
        let result = run_pipeline(rows, None, &config, &CancellationToken::new()).unwrap();
        assert_eq!(result.takes.len(), 2);
        assert_eq!(result.takes[0].take_number, 1);
        assert_eq!(result.takes[1].take_number, 2);
        assert_eq!(result.summary.grand_total, result.summary.per_speaker.iter().map(|(_, c)| c).sum::<usize>());
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let config = TakeConfig::default();
        let result = run_pipeline(Vec::new(), None, &config, &CancellationToken::new()).unwrap();
        assert!(result.takes.is_empty());
        assert_eq!(result.summary.grand_total, 0);
    }
}
