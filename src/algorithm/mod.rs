pub mod traits;
pub mod frontier;
pub mod report;
pub mod engine;

pub use traits::{Frontier, FrontierMode, Selection};
pub use engine::StepEngine;
