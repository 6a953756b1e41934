// Platform Evolution Sankey - Core Library
// Turns a declarative platform timeline into the node/link layout a
// Sankey renderer consumes. Exposes all modules for the CLI, the web
// server and tests.

pub mod closer;
pub mod config;
pub mod diagram;
pub mod layout;
pub mod month;
pub mod timeline;

// Re-export commonly used types
pub use closer::{close_timeline, ClosedTimeline, CURRENT_SUFFIX};
pub use config::SankeyConfig;
pub use diagram::{build_diagram, diagram_from_config, SankeyDiagram};
pub use layout::{position_nodes, LayoutError, NodePositions, EDGE_MARGIN};
pub use month::{Month, MonthParseError};
pub use timeline::{NodeOrigin, PlatformNode, PlatformRecord, TransitionLink};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
