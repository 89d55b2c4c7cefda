//! Re-exports of std values for when the std is available.
pub use std::io::{Error, Read, Write};
