//! Galois Field GF(2^8) arithmetic for Reed-Solomon erasure coding
//!
//! ## Primitive polynomial
//!
//! Elements are bytes. Addition and subtraction are XOR; multiplication and
//! division go through logarithm/antilogarithm tables generated from the
//! primitive polynomial 0x11D (x⁸ + x⁴ + x³ + x² + 1) with generator 2.
//!
//! ## Lookup tables
//!
//! The log/antilog tables are built once per process and shared by every
//! [`Gf256`] handle. A handle may additionally use a full 256×256 product
//! table ([`Gf256::with_multiplication_table`]); this trades 64KB of memory
//! for one lookup per multiply and never changes results.

use super::error::{RsError, RsResult};
use std::fmt::Debug;
use std::sync::OnceLock;

/// GF(2^8) primitive polynomial: 0x11D (x⁸ + x⁴ + x³ + x² + 1)
const GF8_GENERATOR: u32 = 0x11D;

/// Number of elements in the field
pub const FIELD_SIZE: usize = 256;

/// Order of the multiplicative group
const LIMIT: usize = FIELD_SIZE - 1;

/// Operations a matrix needs from the field its entries live in.
///
/// Any type implementing this trait can back a [`Matrix`](super::Matrix).
/// Implementations must be cheap to clone since every matrix carries its own
/// handle.
pub trait Field: Clone + Debug {
    type Elem: Copy + PartialEq + Eq + Debug;

    /// Additive identity
    fn zero(&self) -> Self::Elem;

    /// Multiplicative identity
    fn one(&self) -> Self::Elem;

    fn add(&self, a: Self::Elem, b: Self::Elem) -> Self::Elem;

    fn sub(&self, a: Self::Elem, b: Self::Elem) -> Self::Elem;

    fn mul(&self, a: Self::Elem, b: Self::Elem) -> Self::Elem;

    /// Divide `a` by `b`, failing with [`RsError::DivisionByZero`] when `b` is zero
    fn div(&self, a: Self::Elem, b: Self::Elem) -> RsResult<Self::Elem>;

    #[inline]
    fn is_zero(&self, a: Self::Elem) -> bool {
        a == self.zero()
    }
}

/// Logarithm and antilogarithm tables for GF(2^8)
pub struct GaloisTable {
    pub log: [u8; FIELD_SIZE],
    /// Doubled so `log[a] + log[b]` never needs a modulo
    pub antilog: [u8; 2 * LIMIT],
}

impl GaloisTable {
    fn new() -> Self {
        let mut table = GaloisTable {
            log: [0; FIELD_SIZE],
            antilog: [0; 2 * LIMIT],
        };
        table.build_tables();
        table
    }

    fn build_tables(&mut self) {
        let mut b = 1u32;

        for l in 0..LIMIT {
            self.log[b as usize] = l as u8;
            self.antilog[l] = b as u8;
            self.antilog[l + LIMIT] = b as u8;

            b <<= 1;
            if b & FIELD_SIZE as u32 != 0 {
                b ^= GF8_GENERATOR;
            }
        }

        // log(0) is undefined; callers check for zero before consulting it
        self.log[0] = 0;
    }

    #[inline]
    fn mul(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.antilog[self.log[a as usize] as usize + self.log[b as usize] as usize]
    }
}

/// Full product table, `table[a][b] = a * b`
pub struct MulTable {
    table: Box<[[u8; FIELD_SIZE]; FIELD_SIZE]>,
}

impl MulTable {
    fn new(galois: &GaloisTable) -> Self {
        let mut table = Box::new([[0u8; FIELD_SIZE]; FIELD_SIZE]);
        for (a, row) in table.iter_mut().enumerate() {
            for (b, product) in row.iter_mut().enumerate() {
                *product = galois.mul(a as u8, b as u8);
            }
        }
        MulTable { table }
    }
}

fn galois_table() -> &'static GaloisTable {
    static TABLE: OnceLock<GaloisTable> = OnceLock::new();
    TABLE.get_or_init(GaloisTable::new)
}

fn mul_table() -> &'static MulTable {
    static TABLE: OnceLock<MulTable> = OnceLock::new();
    TABLE.get_or_init(|| MulTable::new(galois_table()))
}

/// Handle to GF(2^8) arithmetic
///
/// Copying a handle is free; all handles share the same process-wide tables.
#[derive(Clone, Copy)]
pub struct Gf256 {
    tables: &'static GaloisTable,
    products: Option<&'static MulTable>,
}

impl Gf256 {
    /// Field using log/antilog lookups for every multiply and divide
    pub fn new() -> Self {
        Self {
            tables: galois_table(),
            products: None,
        }
    }

    /// Field that multiplies through a precomputed 256×256 product table
    pub fn with_multiplication_table() -> Self {
        Self {
            tables: galois_table(),
            products: Some(mul_table()),
        }
    }

    /// Pick the lookup strategy at runtime
    pub fn with_config(use_multiplication_table: bool) -> Self {
        if use_multiplication_table {
            Self::with_multiplication_table()
        } else {
            Self::new()
        }
    }

    pub fn uses_multiplication_table(&self) -> bool {
        self.products.is_some()
    }

    /// Map a codeword row index to the field element with the same bits
    pub fn from_index(index: usize) -> Option<u8> {
        u8::try_from(index).ok()
    }

    /// Multiplicative inverse
    pub fn inverse(&self, a: u8) -> RsResult<u8> {
        if a == 0 {
            return Err(RsError::DivisionByZero);
        }
        Ok(self.tables.antilog[LIMIT - self.tables.log[a as usize] as usize])
    }

    /// Raise `base` to `exponent`; `0^0` is 1
    pub fn pow(&self, base: u8, exponent: u32) -> u8 {
        if exponent == 0 {
            return 1;
        }
        if base == 0 {
            return 0;
        }
        let log = self.tables.log[base as usize] as u64;
        self.tables.antilog[((log * exponent as u64) % LIMIT as u64) as usize]
    }
}

impl Default for Gf256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Gf256 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gf256")
            .field("multiplication_table", &self.products.is_some())
            .finish()
    }
}

impl Field for Gf256 {
    type Elem = u8;

    #[inline]
    fn zero(&self) -> u8 {
        0
    }

    #[inline]
    fn one(&self) -> u8 {
        1
    }

    #[inline]
    fn add(&self, a: u8, b: u8) -> u8 {
        a ^ b
    }

    #[inline]
    fn sub(&self, a: u8, b: u8) -> u8 {
        a ^ b
    }

    #[inline]
    fn mul(&self, a: u8, b: u8) -> u8 {
        match self.products {
            Some(products) => products.table[a as usize][b as usize],
            None => self.tables.mul(a, b),
        }
    }

    #[inline]
    fn div(&self, a: u8, b: u8) -> RsResult<u8> {
        Ok(self.mul(a, self.inverse(b)?))
    }
}
