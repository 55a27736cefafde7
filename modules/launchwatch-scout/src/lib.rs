pub mod capture;
pub mod extractor;
pub mod filter;
pub mod publisher;
pub mod renderer;
pub mod research;
pub mod selection;
pub mod sources;
pub mod stats;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use research::{launch_window, ProductResearch};
pub use selection::{Selection, SelectionOutcome};
pub use stats::RunStats;
