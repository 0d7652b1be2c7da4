/// Tunable constraints for the take partitioner, with the defaults from the
/// external interface spec.
#[derive(Debug, Clone, PartialEq)]
pub struct TakeConfig {
    /// Hard cap on `out - in` for a take, in seconds.
    pub max_take_duration_seconds: f64,
    /// Hard cap on the number of interventions in a take.
    pub max_lines_per_take: usize,
    /// Hard cap on a single speaker's longest consecutive run within a take.
    pub max_consecutive_lines_per_speaker: usize,
    /// Hard cap on a single speaker's total interventions within a take.
    pub max_total_lines_per_speaker_in_take: usize,
    /// Maximum effective (parenthesis-excluded) characters per dialogue line.
    pub max_dialogue_line_chars: usize,
    /// Frame rate used to interpret the optional `:ff` field of a time-code.
    pub frame_rate: f64,
}

impl Default for TakeConfig {
    fn default() -> Self {
        Self {
            max_take_duration_seconds: 30.0,
            max_lines_per_take: 10,
            max_consecutive_lines_per_speaker: 5,
            max_total_lines_per_speaker_in_take: 5,
            max_dialogue_line_chars: 60,
            frame_rate: 24.0,
        }
    }
}
