use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::models::{Intervention, TakeConfig};
use crate::stages::splitter::split_dialogue;
use crate::stages::timecode::parse_timecode;

static CONTROL_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{C}").unwrap());

/// A row as read off the input spreadsheet, before time-codes are parsed or
/// dialogue is split.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub in_raw: String,
    pub out_raw: String,
    pub speaker: String,
    pub dialogue: String,
    pub scene: String,
}

fn strip_control_chars(s: &str) -> String {
    CONTROL_CHARS.replace_all(s, "").to_string()
}

/// Normalizes raw rows into interventions, applying (in order): the optional
/// speaker allow-list filter, time-code parsing, control-character stripping,
/// and dialogue line-splitting, then sorts the full cross-scene sequence by
/// `(in_s, out_s)` before partitioning it into per-scene groups.
///
/// Scenes in the returned `Vec` appear in order of first appearance *within
/// the sorted sequence*, not in original row order.
pub fn normalize(
    rows: Vec<RawRow>,
    speaker_filter: Option<&[String]>,
    config: &TakeConfig,
) -> Vec<(String, Vec<Intervention>)> {
    let mut interventions: Vec<Intervention> = rows
        .into_iter()
        .filter(|row| match speaker_filter {
            Some(allowed) => allowed.iter().any(|s| s == &row.speaker),
            None => true,
        })
        .flat_map(|row| {
            let in_s = parse_timecode(&row.in_raw, config.frame_rate);
            let out_s = parse_timecode(&row.out_raw, config.frame_rate);
            let speaker = strip_control_chars(&row.speaker);
            let scene = strip_control_chars(&row.scene);
            let dialogue = strip_control_chars(&row.dialogue);

            split_dialogue(&dialogue, config.max_dialogue_line_chars)
                .into_iter()
                .map(move |line| Intervention {
                    in_s,
                    out_s,
                    in_raw: row.in_raw.clone(),
                    out_raw: row.out_raw.clone(),
                    speaker: speaker.clone(),
                    dialogue: line,
                    scene: scene.clone(),
                })
                .collect::<Vec<_>>()
        })
        .collect();

    interventions.sort_by(|a, b| {
        a.in_s
            .partial_cmp(&b.in_s)
            .unwrap()
            .then(a.out_s.partial_cmp(&b.out_s).unwrap())
    });

    let mut scenes: Vec<(String, Vec<Intervention>)> = Vec::new();
    for iv in interventions {
        match scenes.iter_mut().find(|(scene, _)| *scene == iv.scene) {
            Some((_, ivs)) => ivs.push(iv),
            None => scenes.push((iv.scene.clone(), vec![iv])),
        }
    }

    info!(
        scenes = scenes.len(),
        interventions = scenes.iter().map(|(_, ivs)| ivs.len()).sum::<usize>(),
        "normalized input rows"
    );

    scenes
}
