mod load;
mod model;
mod parse;

pub use load::load_network;
pub use model::{EdgeRecord, LoadError, MISSING_VALUE, NetworkGraph, NodeRecord, UnresolvedEdge};
