pub mod cancel;
pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod stages;

pub use cancel::CancellationToken;
pub use error::TakeError;
pub use io::{read_rows, render_transcript, write_transcript, write_workbook};
pub use models::{Block, Intervention, SpeakerSummary, Take, TakeConfig};
pub use pipeline::{run_pipeline, PipelineResult};
