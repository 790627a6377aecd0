// Input/Output: streamed frame encoding

pub mod frame;

// Re-export main types and functions
pub use frame::{decode_332, encode_332};
