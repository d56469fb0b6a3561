mod types;

pub use types::{EncodeError, Result};
