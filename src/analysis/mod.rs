// Aggregation and scoring core.
//
// The pipeline: `normalize` turns raw chat lines into countable tokens,
// `stats` owns the per-user accumulators and the global word table,
// `aggregator` routes each (user, text) event into them, and `scoring`
// converts the accumulated counters into ranked reports at shutdown.

pub mod aggregator;
pub mod normalize;
pub mod scoring;
pub mod stats;
