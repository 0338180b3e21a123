pub mod config;
pub mod error;
pub mod reporter;
pub mod traits;

pub use error::*;
pub use traits::*;
