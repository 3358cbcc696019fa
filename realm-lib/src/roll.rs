pub mod batch;
pub mod segment;
pub mod trace;

pub use batch::BatchResults;
pub use batch::RollResults;
pub use batch::Thresholds;
pub use batch::Verdict;
pub use segment::SegmentResult;

/// Interface for rolling dices
///
/// `throw` must return a value in `1..=faces`.
pub trait Source {
    fn throw(&mut self, faces: u64) -> u64;
}
