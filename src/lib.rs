//! Rockbreak - downtime analytics for primary crushing circuits
//!
//! This library correlates truck delivery records with rockbreaker downtime
//! events recorded at the Grizzly and Crusher checkpoints of two crushing
//! areas, then aggregates comparative metrics per checkpoint location or
//! material source zone. The pipeline is a strict chain of pure stages:
//! normalize -> partition -> as-of correlate -> window -> aggregate -> rank.

pub mod aggregate;
pub mod asof;
pub mod cli;
pub mod csv_output;
pub mod error;
pub mod ingest;
pub mod json_output;
pub mod normalize;
pub mod partition;
pub mod pipeline;
pub mod rank;
pub mod record;
pub mod summary;
pub mod window;
