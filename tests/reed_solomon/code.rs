//! Systematic Reed-Solomon Code Tests
//!
//! Encoding, decoder preparation, and recovery from every erasure pattern.

use rsecc::reed_solomon::{DecoderCache, Field, Gf256, ReedSolomonCode, RsError};
use std::sync::Arc;

/// All `k`-element subsets of `0..n`, in lexicographic order
fn subsets(n: usize, k: usize) -> Vec<Vec<usize>> {
    fn walk(
        start: usize,
        n: usize,
        k: usize,
        current: &mut Vec<usize>,
        out: &mut Vec<Vec<usize>>,
    ) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in start..n {
            current.push(i);
            walk(i + 1, n, k, current, out);
            current.pop();
        }
    }
    let mut out = Vec::new();
    walk(0, n, k, &mut Vec::new(), &mut out);
    out
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_invalid_parameters_rejected() {
    let gf = Gf256::new();
    for (n, k) in [(4, 0), (4, 4), (4, 5), (257, 4)] {
        assert!(matches!(
            ReedSolomonCode::new(n, k, gf),
            Err(RsError::InvalidParameters { .. })
        ));
    }
}

#[test]
fn test_largest_code_builds() {
    let code = ReedSolomonCode::new(256, 255, Gf256::with_multiplication_table()).unwrap();
    assert_eq!(code.encoder_matrix().rows(), 256);
    assert_eq!(code.encoder_matrix().cols(), 255);
}

#[test]
fn test_encoder_is_systematic() {
    let gf = Gf256::new();
    for (n, k) in [(3, 2), (8, 4), (20, 7), (255, 200)] {
        let code = ReedSolomonCode::new(n, k, gf).unwrap();
        let encoder = code.encoder_matrix();
        for i in 0..k {
            for j in 0..k {
                let expected = if i == j { gf.one() } else { gf.zero() };
                assert_eq!(
                    encoder.get(i, j),
                    Ok(expected),
                    "({}, {}) code, entry ({}, {})",
                    n,
                    k,
                    i,
                    j
                );
            }
        }
    }
}

#[test]
fn test_codeword_starts_with_message() {
    let code = ReedSolomonCode::new(10, 6, Gf256::new()).unwrap();
    let message = [9, 8, 7, 6, 5, 4];
    let codeword = code.encode(&message).unwrap();
    assert_eq!(codeword.len(), 10);
    assert_eq!(&codeword[..6], &message);
}

#[test]
fn test_lookup_strategies_agree() {
    let plain = ReedSolomonCode::new(12, 5, Gf256::new()).unwrap();
    let table = ReedSolomonCode::new(12, 5, Gf256::with_multiplication_table()).unwrap();
    assert_eq!(plain.encoder_matrix(), table.encoder_matrix());
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_every_erasure_pattern_recovers_message() {
    let mut code = ReedSolomonCode::new(7, 3, Gf256::new()).unwrap();
    let message = [0x11, 0xEE, 0x5A];
    let codeword = code.encode(&message).unwrap();

    for positions in subsets(7, 3) {
        code.prepare_decoder(&positions).unwrap();
        let received: Vec<u8> = positions.iter().map(|&p| codeword[p]).collect();
        assert_eq!(code.decode(&received).unwrap(), message, "positions {:?}", positions);
    }
}

#[test]
fn test_position_order_follows_received_order() {
    let mut code = ReedSolomonCode::new(6, 3, Gf256::new()).unwrap();
    let message = [1, 2, 3];
    let codeword = code.encode(&message).unwrap();

    let positions = [5, 0, 3];
    code.prepare_decoder(&positions).unwrap();
    let received = [codeword[5], codeword[0], codeword[3]];
    assert_eq!(code.decode(&received).unwrap(), message);
}

#[test]
fn test_decode_without_prepare_is_not_ready() {
    let code = ReedSolomonCode::new(5, 2, Gf256::new()).unwrap();
    assert_eq!(code.decode(&[1, 2]), Err(RsError::NotReady));
    assert!(code.prepared_decoder().is_none());
}

#[test]
fn test_bad_positions_rejected() {
    let code = ReedSolomonCode::new(5, 2, Gf256::new()).unwrap();
    for positions in [vec![0], vec![0, 1, 2], vec![0, 5], vec![3, 3]] {
        assert!(
            matches!(code.decoder(&positions), Err(RsError::InvalidInput(_))),
            "positions {:?}",
            positions
        );
    }
}

#[test]
fn test_decode_wrong_symbol_count() {
    let mut code = ReedSolomonCode::new(5, 2, Gf256::new()).unwrap();
    code.prepare_decoder(&[1, 4]).unwrap();
    assert!(matches!(
        code.decode(&[1, 2, 3]),
        Err(RsError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_standalone_decoder_matches_prepared() {
    let mut code = ReedSolomonCode::new(9, 4, Gf256::new()).unwrap();
    let positions = [8, 6, 1, 2];
    let decoder = code.decoder(&positions).unwrap();
    code.prepare_decoder(&positions).unwrap();
    assert_eq!(decoder.positions(), &positions);
    assert_eq!(decoder.matrix(), code.prepared_decoder().unwrap().matrix());
}

// ============================================================================
// Decoder Cache
// ============================================================================

#[test]
fn test_cache_shared_across_threads() {
    let code = ReedSolomonCode::new(8, 4, Gf256::new()).unwrap();
    let message = [10, 20, 30, 40];
    let codeword = code.encode(&message).unwrap();
    let cache = Arc::new(DecoderCache::new(code));

    let handles: Vec<_> = subsets(8, 4)
        .into_iter()
        .map(|positions| {
            let cache = Arc::clone(&cache);
            let codeword = codeword.clone();
            std::thread::spawn(move || {
                let decoder = cache.get(&positions).unwrap();
                let received: Vec<u8> = positions.iter().map(|&p| codeword[p]).collect();
                decoder.decode(&received).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), message);
    }
    assert_eq!(cache.len(), 70);
}
