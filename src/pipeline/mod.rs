pub mod clean;
pub mod features;
pub mod geo;
pub mod raw;
pub mod translate;

/// The shared "missing" marker for review and rate fields. Deliberately
/// out-of-domain (-1, not 0 and not NaN): the model learned this exact
/// pattern at training time, so the cleaning stage and the inference
/// translator must agree on it bit for bit.
pub const MISSING_SENTINEL: f64 = -1.0;
