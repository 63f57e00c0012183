pub mod serialization;
pub mod validation;

pub use validation::ValidatedJson;
