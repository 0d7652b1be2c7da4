use std::collections::{HashMap, HashSet};

use crate::models::{SpeakerSummary, Take};

/// Assigns globally sequential take numbers (starting at 1, in scene order)
/// across every scene's partition result, and tallies each speaker's
/// distinct-take count.
pub fn assemble_takes(scene_takes: Vec<Vec<Take>>) -> (Vec<Take>, SpeakerSummary) {
    let mut takes: Vec<Take> = Vec::new();
    let mut speaker_takes: HashMap<String, HashSet<u32>> = HashMap::new();
    let mut next_number = 1u32;

    for mut scene in scene_takes {
        for take in &mut scene {
            take.take_number = next_number;
            for iv in &take.interventions {
                speaker_takes
                    .entry(iv.speaker.clone())
                    .or_default()
                    .insert(next_number);
            }
            next_number += 1;
        }
        takes.extend(scene);
    }

    let mut per_speaker: Vec<(String, usize)> = speaker_takes
        .into_iter()
        .map(|(speaker, take_numbers)| (speaker, take_numbers.len()))
        .collect();
    per_speaker.sort_by(|a, b| a.0.cmp(&b.0));
    let grand_total = per_speaker.iter().map(|(_, count)| count).sum();

    (
        takes,
        SpeakerSummary {
            per_speaker,
            grand_total,
        },
    )
}
