pub mod priority_queue;
pub mod unvisited_set;

pub use priority_queue::MinHeap;
pub use unvisited_set::UnvisitedSet;
