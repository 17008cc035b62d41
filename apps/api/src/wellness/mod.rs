// Composite wellness score: weighted, capped factors over a dog's care records.
// Scoring is pure; service.rs does the concurrent record fan-out.

pub mod handlers;
pub mod policy;
pub mod scoring;
pub mod service;

pub use policy::ScoringPolicy;
