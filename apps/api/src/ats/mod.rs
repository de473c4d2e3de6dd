// ATS scoring core: keyword engine, skill clustering and score aggregation.
// Everything below `handlers` is synchronous and pure.

pub mod clusters;
pub mod handlers;
pub mod keywords;
pub mod scorer;
