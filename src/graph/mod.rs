mod fetch;
mod model;
mod parse;

pub use fetch::fetch_graph;
pub use model::{GraphData, GraphLink, GraphNode};
pub use parse::parse_graph_text;
