//! Reed-Solomon erasure coding for files
//!
//! Splits a file into `n` pieces so that any `k` of them rebuild it exactly.
//! The algebra lives in [`reed_solomon`]; [`codec`] drives it over files.

pub mod args;
pub mod codec;
pub mod reed_solomon;
pub mod reporters;

pub use codec::{
    decode_files, decode_files_with_config, encode_file, encode_file_with_config, piece_path,
    CodecConfig, CodecError, DecodeSummary, PieceHeader,
};
pub use reed_solomon::{Field, Gf256, Matrix, ReedSolomonCode, RsError};
