mod adapter;
mod adjacency;
mod component;
mod detail;
mod engine;
mod highlight;
mod layout;
mod render;
mod state;
mod types;

pub use adapter::adapt;
pub use adjacency::IndexedGraph;
pub use component::ForceGraphCanvas;
