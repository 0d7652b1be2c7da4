pub mod assemble;
pub mod blocks;
pub mod normalize;
pub mod partition;
pub mod splitter;
pub mod timecode;

pub use assemble::assemble_takes;
pub use blocks::group_blocks;
pub use normalize::{normalize, RawRow};
pub use partition::partition_scene;
pub use splitter::split_dialogue;
pub use timecode::parse_timecode;
