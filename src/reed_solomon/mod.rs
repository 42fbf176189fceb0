//! Reed-Solomon Erasure Coding Module
//!
//! This module provides the algebra behind the file codec: GF(2^8) arithmetic,
//! matrices generic over any field, and a systematic `(n, k)` Reed-Solomon code
//! that recovers a `k`-symbol message from any `k` of its `n` codeword symbols.

pub mod code;
pub mod error;
pub mod galois;
pub mod matrix;

pub use code::{validate_parameters, Decoder, DecoderCache, ReedSolomonCode};
pub use error::{RsError, RsResult};
pub use galois::{Field, Gf256, FIELD_SIZE};
pub use matrix::Matrix;
