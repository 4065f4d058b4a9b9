pub mod aggregate;
pub mod bucket;
pub mod render;

pub use aggregate::{aggregate, ContributionGraph, Tally};
pub use bucket::{effective_date, week_index, WeekBucket};
pub use render::render_graph;
