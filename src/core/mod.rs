// Error taxonomy and exit-code mapping shared by every layer.
pub mod error;
