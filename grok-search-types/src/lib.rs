#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod error;
pub mod progress;
pub mod provider;
pub mod request;

pub use error::*;
pub use progress::*;
pub use provider::*;
pub use request::*;
