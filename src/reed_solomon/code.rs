//! Systematic Reed-Solomon erasure code over GF(2^8)
//!
//! ## Encoder construction
//!
//! The raw generator is the `n×k` Vandermonde matrix `E[i][j] = i^j`, with row
//! `i` evaluated at the field element whose bits equal `i`. Row 0 is therefore
//! `[1, 0, 0, …]`. The matrix is then put in systematic form by column
//! operations, performed as row operations on its transpose:
//!
//! ```text
//! Eᵀ (k×n) --lower_gaussian_elim--> [U | R] --U⁻¹·--> [I | U⁻¹R] --transpose--> E_sys
//! ```
//!
//! Column operations keep the code (the column space of `E`) unchanged, so
//! any `k` rows of the systematic matrix stay invertible, and its first `k`
//! rows are the identity: the first `k` codeword symbols are the message.
//!
//! ## Decoding
//!
//! A decoder is tied to one erasure pattern: the ordered list of `k`
//! surviving codeword positions. It is the inverse of those `k` encoder rows.
//! [`ReedSolomonCode::decoder`] returns an immutable [`Decoder`] that can be
//! shared across threads; [`DecoderCache`] keeps one per pattern.

use super::error::{RsError, RsResult};
use super::galois::{Gf256, FIELD_SIZE};
use super::matrix::Matrix;
use log::debug;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use std::sync::{Arc, Mutex};

/// Check `0 < k < n <= 256`
pub fn validate_parameters(n: usize, k: usize) -> RsResult<()> {
    if k == 0 || k >= n || n > FIELD_SIZE {
        return Err(RsError::InvalidParameters { n, k });
    }
    Ok(())
}

/// Decoder matrix for one erasure pattern
#[derive(Debug, Clone)]
pub struct Decoder {
    positions: Vec<usize>,
    matrix: Matrix<Gf256>,
}

impl Decoder {
    /// Codeword positions this decoder expects, in order
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn matrix(&self) -> &Matrix<Gf256> {
        &self.matrix
    }

    /// Recover the `k`-symbol message from the symbols at [`positions`](Self::positions)
    pub fn decode(&self, received: &[u8]) -> RsResult<Vec<u8>> {
        self.matrix.left_mul_column_vec(received)
    }

    pub fn decode_into(&self, received: &[u8], message: &mut [u8]) -> RsResult<()> {
        self.matrix.left_mul_column_vec_into(received, message)
    }
}

/// Reed-Solomon `(n, k)` erasure code
#[derive(Debug, Clone)]
pub struct ReedSolomonCode {
    n: usize,
    k: usize,
    field: Gf256,
    encoder: Matrix<Gf256>,
    decoder: Option<Decoder>,
}

impl ReedSolomonCode {
    /// Build the systematic encoder for an `(n, k)` code
    pub fn new(n: usize, k: usize, field: Gf256) -> RsResult<Self> {
        validate_parameters(n, k)?;
        let encoder = build_systematic_encoder(n, k, field)?;
        debug!(
            "Built ({}, {}) encoder matrix (multiplication table: {})",
            n,
            k,
            field.uses_multiplication_table()
        );
        Ok(Self {
            n,
            k,
            field,
            encoder,
            decoder: None,
        })
    }

    /// Codeword length
    pub fn n(&self) -> usize {
        self.n
    }

    /// Message length
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn field(&self) -> &Gf256 {
        &self.field
    }

    pub fn encoder_matrix(&self) -> &Matrix<Gf256> {
        &self.encoder
    }

    /// Encode a `k`-symbol message into an `n`-symbol codeword
    pub fn encode(&self, message: &[u8]) -> RsResult<Vec<u8>> {
        self.encoder.left_mul_column_vec(message)
    }

    pub fn encode_into(&self, message: &[u8], codeword: &mut [u8]) -> RsResult<()> {
        self.encoder.left_mul_column_vec_into(message, codeword)
    }

    /// Build an immutable decoder for the given surviving positions
    ///
    /// `positions` must hold exactly `k` distinct indices in `[0, n)`. The
    /// order matters: received symbols must be passed in the same order.
    pub fn decoder(&self, positions: &[usize]) -> RsResult<Decoder> {
        if positions.len() != self.k {
            return Err(RsError::InvalidInput(format!(
                "expected {} positions, got {}",
                self.k,
                positions.len()
            )));
        }
        let mut seen = HashSet::default();
        for &position in positions {
            if position >= self.n {
                return Err(RsError::InvalidInput(format!(
                    "position {} out of range for n={}",
                    position, self.n
                )));
            }
            if !seen.insert(position) {
                return Err(RsError::InvalidInput(format!(
                    "position {} listed more than once",
                    position
                )));
            }
        }

        let matrix = self.encoder.select_rows(positions)?.inverse()?;
        debug!("Prepared decoder for positions {:?}", positions);
        Ok(Decoder {
            positions: positions.to_vec(),
            matrix,
        })
    }

    /// Prepare the decoder used by [`decode`](Self::decode)
    pub fn prepare_decoder(&mut self, positions: &[usize]) -> RsResult<()> {
        if self
            .decoder
            .as_ref()
            .is_some_and(|decoder| decoder.positions == positions)
        {
            return Ok(());
        }
        // A failed prepare must not leave the previous pattern's decoder usable
        self.decoder = None;
        self.decoder = Some(self.decoder(positions)?);
        Ok(())
    }

    /// The decoder built by the last successful [`prepare_decoder`](Self::prepare_decoder)
    pub fn prepared_decoder(&self) -> Option<&Decoder> {
        self.decoder.as_ref()
    }

    /// Decode `k` received symbols, ordered as the prepared positions
    pub fn decode(&self, received: &[u8]) -> RsResult<Vec<u8>> {
        self.decoder
            .as_ref()
            .ok_or(RsError::NotReady)?
            .decode(received)
    }
}

/// Vandermonde generator `E[i][j] = i^j`
///
/// `pow` maps `0^0` to one, so row 0 is `[1, 0, 0, ...]`.
fn vandermonde(n: usize, k: usize, field: Gf256) -> RsResult<Matrix<Gf256>> {
    let mut matrix = Matrix::new(n, k, field);
    for i in 0..n {
        let x = Gf256::from_index(i).ok_or(RsError::InvalidParameters { n, k })?;
        for j in 0..k {
            matrix.set(i, j, field.pow(x, j as u32))?;
        }
    }
    Ok(matrix)
}

fn build_systematic_encoder(n: usize, k: usize, field: Gf256) -> RsResult<Matrix<Gf256>> {
    let mut transposed = vandermonde(n, k, field)?.transpose();
    transposed.lower_gaussian_elim()?;
    let upper = transposed.block(0..k, 0..k)?;
    let systematic = upper.upper_inverse()?.mul(&transposed)?;
    Ok(systematic.transpose())
}

/// Pattern-keyed cache of immutable decoders
///
/// Each distinct erasure pattern gets its own [`Decoder`]; lookups from
/// several threads never share mutable decoder state.
pub struct DecoderCache {
    code: ReedSolomonCode,
    decoders: Mutex<HashMap<Vec<usize>, Arc<Decoder>>>,
}

impl DecoderCache {
    pub fn new(code: ReedSolomonCode) -> Self {
        Self {
            code,
            decoders: Mutex::new(HashMap::default()),
        }
    }

    pub fn code(&self) -> &ReedSolomonCode {
        &self.code
    }

    /// Fetch the decoder for `positions`, building it on first use
    pub fn get(&self, positions: &[usize]) -> RsResult<Arc<Decoder>> {
        if let Some(decoder) = self.lock().get(positions) {
            return Ok(Arc::clone(decoder));
        }
        // Built outside the lock; a racing thread may build the same pattern
        let decoder = Arc::new(self.code.decoder(positions)?);
        Ok(Arc::clone(
            self.lock()
                .entry(positions.to_vec())
                .or_insert(decoder),
        ))
    }

    /// Number of cached patterns
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Vec<usize>, Arc<Decoder>>> {
        // The map is only ever inserted into, so a poisoned lock still holds valid entries
        self.decoders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
