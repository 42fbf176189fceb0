//! Galois Field (GF(2^8)) Arithmetic Tests
//!
//! Tests for Gf256 field operations including addition, multiplication,
//! division, powers, and the multiplication table option.

use rsecc::reed_solomon::{Field, Gf256, RsError};

// ============================================================================
// Basic Arithmetic Operations
// ============================================================================

#[test]
fn test_gf256_basic_operations() {
    let gf = Gf256::new();

    // Test addition (XOR in GF)
    assert_eq!(gf.add(5, 3), 6); // 5 XOR 3 = 6

    // Test subtraction (same as addition in GF(2^n))
    assert_eq!(gf.sub(5, 3), 6);
}

#[test]
fn test_gf256_identities() {
    let gf = Gf256::new();
    assert_eq!(gf.zero(), 0);
    assert_eq!(gf.one(), 1);
    assert_eq!(gf.mul(42, gf.one()), 42);
    assert_eq!(gf.add(42, gf.zero()), 42);
    assert_eq!(gf.mul(42, gf.zero()), 0);
}

#[test]
fn test_gf256_characteristic_two() {
    let gf = Gf256::new();
    for a in 0..=255u8 {
        assert_eq!(gf.add(a, a), 0, "a + a != 0 for a = {}", a);
    }
}

// ============================================================================
// Division and Inverses
// ============================================================================

#[test]
fn test_gf256_every_nonzero_element_has_inverse() {
    let gf = Gf256::new();
    for a in 1..=255u8 {
        let inverse = gf.div(1, a).unwrap();
        assert_eq!(gf.mul(a, inverse), 1, "Failed for a = {}", a);
        assert_eq!(gf.inverse(a), Ok(inverse));
    }
}

#[test]
fn test_gf256_division_by_zero_is_an_error() {
    let gf = Gf256::new();
    assert_eq!(gf.div(42, 0), Err(RsError::DivisionByZero));
    assert_eq!(gf.div(0, 0), Err(RsError::DivisionByZero));
}

#[test]
fn test_gf256_zero_divided_by_nonzero() {
    let gf = Gf256::new();
    for b in 1..=255u8 {
        assert_eq!(gf.div(0, b), Ok(0));
    }
}

#[test]
fn test_gf256_division_undoes_multiplication() {
    let gf = Gf256::with_multiplication_table();
    for a in 0..=255u8 {
        for b in 1..=255u8 {
            assert_eq!(gf.div(gf.mul(a, b), b), Ok(a));
        }
    }
}

// ============================================================================
// Powers
// ============================================================================

#[test]
fn test_gf256_power_matches_repeated_multiplication() {
    let gf = Gf256::new();
    for base in [0u8, 1, 2, 3, 0x53, 0xFF] {
        let mut manual = 1u8;
        for exponent in 0..20u32 {
            assert_eq!(gf.pow(base, exponent), manual, "{}^{}", base, exponent);
            manual = gf.mul(manual, base);
        }
    }
}

#[test]
fn test_gf256_generator_has_full_order() {
    let gf = Gf256::new();
    // 2 generates the multiplicative group: 2^k != 1 for 0 < k < 255
    for exponent in 1..255u32 {
        assert_ne!(gf.pow(2, exponent), 1);
    }
    assert_eq!(gf.pow(2, 255), 1);
}

// ============================================================================
// Lookup Strategy
// ============================================================================

#[test]
fn test_gf256_config_selects_table() {
    assert!(Gf256::with_config(true).uses_multiplication_table());
    assert!(!Gf256::with_config(false).uses_multiplication_table());
    assert!(!Gf256::default().uses_multiplication_table());
}
