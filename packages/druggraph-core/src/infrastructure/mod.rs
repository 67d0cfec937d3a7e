//! Infrastructure layer
//!
//! - `builder`: records → graph construction
//! - `mention`: drug-name scan over document titles
//! - `codec`: JSON persistence of a graph

pub mod builder;
pub mod codec;
pub mod mention;

pub use builder::GraphBuilder;
pub use mention::MentionDetector;
