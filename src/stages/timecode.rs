use tracing::warn;

/// Parses `hh:mm:ss` or `hh:mm:ss:ff` into seconds, interpreting the optional
/// frame field at `frame_rate` frames per second.
///
/// Malformed input (wrong field count, non-numeric or negative fields, or
/// leading/trailing whitespace) yields `0.0` and a logged warning; it never
/// aborts the pipeline. The function is pure, so identical input always
/// yields the same result.
pub fn parse_timecode(raw: &str, frame_rate: f64) -> f64 {
    if raw != raw.trim() {
        warn!("malformed time-code (surrounding whitespace): {raw:?}");
        return 0.0;
    }

    let fields: Option<Vec<i64>> = raw.split(':').map(|part| part.parse::<i64>().ok()).collect();
    let fields = match fields {
        Some(fields) if fields.iter().all(|&v| v >= 0) => fields,
        _ => {
            warn!("malformed time-code: {raw:?}");
            return 0.0;
        }
    };

    let (hours, minutes, seconds, frames) = match fields.as_slice() {
        [h, m, s] => (*h, *m, *s, 0),
        [h, m, s, f] => (*h, *m, *s, *f),
        _ => {
            warn!("malformed time-code: {raw:?}");
            return 0.0;
        }
    };

    hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds as f64 + frames as f64 / frame_rate
}
