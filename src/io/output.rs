use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

use crate::models::{SpeakerSummary, Take};

fn format_timecode(raw: &str) -> String {
    raw.replace(':', " ")
}

/// Writes the optimized takes and the per-speaker summary to a two-sheet
/// workbook at `path`.
pub fn write_workbook(takes: &[Take], summary: &SpeakerSummary, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let takes_sheet = workbook.add_worksheet().set_name("Optimizada_Takes")?;
    let headers = ["TAKE", "IN", "OUT", "PERSONAJE", "DIÁLOGO", "DURACIÓN", "SCENE"];
    for (col, header) in headers.iter().enumerate() {
        takes_sheet.write_with_format(0, col as u16, *header, &bold)?;
    }

    let mut row = 1u32;
    for take in takes {
        for iv in &take.interventions {
            takes_sheet.write(row, 0, take.take_number)?;
            takes_sheet.write(row, 1, iv.in_raw.as_str())?;
            takes_sheet.write(row, 2, iv.out_raw.as_str())?;
            takes_sheet.write(row, 3, iv.speaker.as_str())?;
            takes_sheet.write(row, 4, iv.dialogue.as_str())?;
            takes_sheet.write(row, 5, iv.duration())?;
            takes_sheet.write(row, 6, iv.scene.as_str())?;
            row += 1;
        }
    }

    let summary_sheet = workbook.add_worksheet().set_name("Resumen")?;
    summary_sheet.write_with_format(0, 0, "PERSONAJE", &bold)?;
    summary_sheet.write_with_format(0, 1, "TOTAL_TAKES", &bold)?;

    let mut row = 1u32;
    for (speaker, count) in &summary.per_speaker {
        summary_sheet.write(row, 0, speaker.as_str())?;
        summary_sheet.write(row, 1, *count as u32)?;
        row += 1;
    }
    summary_sheet.write_with_format(row, 0, "Suma total de Takes:", &bold)?;
    summary_sheet.write(row, 1, summary.grand_total as u32)?;

    workbook
        .save(path)
        .with_context(|| format!("writing workbook {}", path.display()))?;

    Ok(())
}

/// Renders a plain-text recording transcript: one `TAKE <n>` block per take,
/// time-codes with colons swapped for spaces, and consecutive lines from the
/// same speaker merged onto a single `SPEAKER:` line, joined by single spaces
/// with embedded newlines flattened the same way.
pub fn render_transcript(takes: &[Take], file_stem: &str) -> String {
    let mut out = String::new();
    out.push_str(&file_stem.to_uppercase());
    out.push_str("\n\n");

    for take in takes {
        out.push_str(&format!("TAKE {}\n", take.take_number));
        if let Some(first) = take.interventions.first() {
            out.push_str(&format_timecode(&first.in_raw));
            out.push('\n');
        }

        let mut i = 0;
        while i < take.interventions.len() {
            let speaker = take.interventions[i].speaker.as_str();
            let mut j = i;
            let mut merged = Vec::new();
            while j < take.interventions.len() && take.interventions[j].speaker == speaker {
                merged.push(take.interventions[j].dialogue.replace('\n', " "));
                j += 1;
            }
            out.push_str(&format!("{}:\t{}\n", speaker, merged.join(" ")));
            i = j;
        }

        if let Some(last) = take.interventions.last() {
            out.push_str(&format_timecode(&last.out_raw));
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

pub fn write_transcript(takes: &[Take], file_stem: &str, path: &Path) -> Result<()> {
    std::fs::write(path, render_transcript(takes, file_stem))
        .with_context(|| format!("writing transcript {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Intervention;

    fn iv(speaker: &str, dialogue: &str, in_raw: &str, out_raw: &str) -> Intervention {
        Intervention {
            in_s: 0.0,
            out_s: 1.0,
            in_raw: in_raw.to_string(),
            out_raw: out_raw.to_string(),
            speaker: speaker.to_string(),
            dialogue: dialogue.to_string(),
            scene: "1".to_string(),
        }
    }

    #[test]
    fn transcript_merges_consecutive_lines_from_the_same_speaker() {
        let take = Take {
            take_number: 1,
            scene: "1".to_string(),
            in_s: 0.0,
            out_s: 2.0,
            interventions: vec![
                iv("ANA", "hola", "00:00:00:00", "00:00:01:00"),
                iv("ANA", "que tal", "00:00:01:00", "00:00:02:00"),
                iv("LUIS", "bien", "00:00:02:00", "00:00:03:00"),
            ],
        };
        let transcript = render_transcript(&[take], "escena_01");
        assert!(transcript.starts_with("ESCENA_01"));
        assert!(transcript.contains("ANA:\thola que tal"));
        assert!(!transcript.contains("ANA:\tque tal"));
        assert!(transcript.contains("LUIS:\tbien"));
        assert!(transcript.contains("00 00 00 00"));
        assert!(transcript.contains("00 00 03 00"));
    }

    #[test]
    fn transcript_flattens_embedded_newlines_in_merged_dialogue() {
        let take = Take {
            take_number: 1,
            scene: "1".to_string(),
            in_s: 0.0,
            out_s: 1.0,
            interventions: vec![iv("ANA", "hola\nmundo", "00:00:00:00", "00:00:01:00")],
        };
        let transcript = render_transcript(&[take], "escena_01");
        assert!(transcript.contains("ANA:\thola mundo"));
    }

    #[test]
    fn empty_takes_yields_just_the_header() {
        let transcript = render_transcript(&[], "vacio");
        assert_eq!(transcript, "VACIO\n\n");
    }
}
