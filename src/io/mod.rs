pub mod input;
pub mod output;

pub use input::read_rows;
pub use output::{render_transcript, write_transcript, write_workbook};
