/// A single spoken (or labeled) line after dialogue splitting.
///
/// Interventions are produced once by the normalizer and never mutated
/// afterward; blocks and takes only ever group or reorder references to them.
#[derive(Debug, Clone)]
pub struct Intervention {
    /// Start time in seconds.
    pub in_s: f64,
    /// End time in seconds.
    pub out_s: f64,
    /// Original `IN` time-code string, preserved verbatim for output.
    pub in_raw: String,
    /// Original `OUT` time-code string, preserved verbatim for output.
    pub out_raw: String,
    /// Speaker identifier (`PERSONAJE`), compared by equality.
    pub speaker: String,
    /// The (possibly split) dialogue line text.
    pub dialogue: String,
    /// Scene identifier.
    pub scene: String,
}

impl Intervention {
    /// `out - in`, clamped to zero. A malformed time-code on either side of
    /// a row degrades to a zero-length field rather than a negative duration
    /// that would violate the DP's monotonicity assumptions.
    pub fn duration(&self) -> f64 {
        (self.out_s - self.in_s).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(in_s: f64, out_s: f64) -> Intervention {
        Intervention {
            in_s,
            out_s,
            in_raw: String::new(),
            out_raw: String::new(),
            speaker: "A".to_string(),
            dialogue: "hi".to_string(),
            scene: "1".to_string(),
        }
    }

    #[test]
    fn duration_is_out_minus_in() {
        assert_eq!(iv(1.0, 3.5).duration(), 2.5);
    }

    #[test]
    fn duration_clamps_negative_to_zero() {
        assert_eq!(iv(5.0, 2.0).duration(), 0.0);
    }
}
