pub mod artifact;
pub mod schema;

pub use artifact::PricingModel;
pub use schema::{ColumnSchema, FeatureVector};
