//! Classification state for pair quality decisions
//!
//! This crate holds the tabular dataset schema shared by the
//! training-row emitter and the classifier (ARFF-style header, row
//! formatting, dataset loading) and the random-forest binary classifier
//! trained from it.

pub mod arff;
pub mod error;
pub mod forest;

pub use arff::{Dataset, CLASS_VALUES, KEPT_CLASS, RELATION};
pub use error::{Error, Result};
pub use forest::{ForestConfig, RandomForest};

#[cfg(test)]
mod tests {
    #[test]
    fn it_works() {
        assert_eq!(2 + 2, 4);
    }
}
