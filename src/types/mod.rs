pub mod decimal;
pub mod domain;
pub use decimal::*;
pub use domain::*;
