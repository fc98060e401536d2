//! Streaming-contract tests over the public surface: chunked feeding,
//! capacity edges at the register boundaries, and padding placement.

use base_lane::{
    OperationStatus, STANDARD, URL_SAFE, decode, decode_to_vec, encode, encode_to_string,
    encoded_len,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Feeds `data` through `encode` in chunks of the given sizes, carrying
/// unconsumed bytes over exactly as the consumed counts dictate.
fn encode_chunked(data: &[u8], splits: &[usize]) -> Vec<u8> {
    let mut out = vec![0u8; encoded_len(data.len()).unwrap()];
    let mut splits = splits.iter().copied().cycle();
    let (mut fed, mut written, mut end) = (0, 0, 0);
    while fed < data.len() || end < data.len() {
        end = (end + splits.next().unwrap().max(1)).min(data.len());
        let is_final = end == data.len();
        let op = encode(&data[fed..end], &mut out[written..], &STANDARD, is_final);
        assert_ne!(op.status, OperationStatus::DestinationTooSmall);
        fed += op.consumed;
        written += op.written;
        if is_final && op.status == OperationStatus::Done {
            break;
        }
    }
    out.truncate(written);
    out
}

fn decode_chunked(symbols: &[u8], splits: &[usize]) -> Vec<u8> {
    let mut out = vec![0u8; symbols.len() / 4 * 3];
    let mut splits = splits.iter().copied().cycle();
    let (mut fed, mut written, mut end) = (0, 0, 0);
    while fed < symbols.len() || end < symbols.len() {
        end = (end + splits.next().unwrap().max(1)).min(symbols.len());
        let is_final = end == symbols.len();
        let op = decode(&symbols[fed..end], &mut out[written..], &STANDARD, is_final);
        assert_ne!(op.status, OperationStatus::InvalidData);
        assert_ne!(op.status, OperationStatus::DestinationTooSmall);
        fed += op.consumed;
        written += op.written;
        if is_final && op.status == OperationStatus::Done {
            break;
        }
    }
    out.truncate(written);
    out
}

#[test]
fn chunked_feeding_is_equivalent_to_one_call() {
    let mut rng = StdRng::seed_from_u64(0x1a5e64);
    let data: Vec<u8> = (0..3000).map(|_| rng.random()).collect();
    let one_shot = encode_to_string(&data, &STANDARD);

    for splits in [
        vec![1],
        vec![2, 3],
        vec![5, 1, 11],
        vec![12],
        vec![16],
        vec![24, 7],
        vec![255],
        vec![2999],
    ] {
        let encoded = encode_chunked(&data, &splits);
        assert_eq!(encoded, one_shot.as_bytes(), "splits {:?}", splits);

        let decoded = decode_chunked(one_shot.as_bytes(), &splits);
        assert_eq!(decoded, data, "splits {:?}", splits);
    }
}

#[test]
fn random_chunk_walk() {
    let mut rng = StdRng::seed_from_u64(0xbeef);
    for _ in 0..32 {
        let len = rng.random_range(0..1200);
        let data: Vec<u8> = (0..len).map(|_| rng.random()).collect();
        let splits: Vec<usize> = (0..16).map(|_| rng.random_range(1..100)).collect();

        let one_shot = encode_to_string(&data, &STANDARD);
        assert_eq!(encode_chunked(&data, &splits), one_shot.as_bytes());
        assert_eq!(decode_chunked(one_shot.as_bytes(), &splits), data);
    }
}

#[test]
fn destination_growth_walk() {
    // drain into deliberately undersized destinations, growing from the
    // reported counts; every stop must land on a group boundary
    let data: Vec<u8> = (0..610usize).map(|i| (i * 7) as u8).collect();
    let expected = encode_to_string(&data, &STANDARD);

    let mut out = Vec::new();
    let mut consumed_total = 0;
    for cap in [5, 17, 64, 1000] {
        let mut chunk = vec![0u8; cap];
        let op = encode(&data[consumed_total..], &mut chunk, &STANDARD, true);
        assert_eq!(op.written % 4, 0, "stops on whole symbol groups");
        out.extend_from_slice(&chunk[..op.written]);
        consumed_total += op.consumed;
        if op.status == OperationStatus::Done {
            break;
        }
        assert_eq!(op.status, OperationStatus::DestinationTooSmall);
        assert_eq!(op.consumed % 3, 0);
    }
    assert_eq!(consumed_total, data.len());
    assert_eq!(out, expected.as_bytes());
}

#[test]
fn capacity_edge_is_exact_at_register_widths() {
    // one destination byte short of required, right at bulk-iteration sizes
    for len in [12, 24, 48, 96, 192] {
        let data: Vec<u8> = (0..len).map(|i| i as u8).collect();
        let required = encoded_len(len).unwrap();
        let mut out = vec![0u8; required - 1];
        let op = encode(&data, &mut out, &STANDARD, true);
        assert_eq!(op.status, OperationStatus::DestinationTooSmall, "len {}", len);
        assert_eq!(op.written, required - 4, "len {}", len);
        assert_eq!(op.consumed, len - 3, "len {}", len);

        let expected = encode_to_string(&data, &STANDARD);
        assert_eq!(&out[..op.written], &expected.as_bytes()[..op.written]);
    }
}

#[test]
fn invalid_symbol_positions_across_register_boundaries() {
    let data: Vec<u8> = (0..96usize).map(|i| i as u8).collect();
    let clean = encode_to_string(&data, &STANDARD);

    for position in [0, 1, 15, 16, 17, 31, 32, 63, 64, 127] {
        let mut corrupted = clean.clone().into_bytes();
        corrupted[position] = b'!';
        let mut out = vec![0u8; 96];
        let op = decode(&corrupted, &mut out, &STANDARD, true);
        assert_eq!(op.status, OperationStatus::InvalidData, "position {}", position);
        // stopped exactly at the group holding the bad symbol
        assert_eq!(op.consumed, position / 4 * 4, "position {}", position);
        assert_eq!(op.written, position / 4 * 3, "position {}", position);
        assert_eq!(&out[..op.written], &data[..op.written]);
    }
}

#[test]
fn url_safe_streams_like_standard() {
    let data: Vec<u8> = (0..500usize).map(|i| (i * 13 + 5) as u8).collect();
    let encoded = encode_to_string(&data, &URL_SAFE);
    assert!(!encoded.contains('+') && !encoded.contains('/'));
    assert_eq!(decode_to_vec(&encoded, &URL_SAFE).unwrap(), data);

    // the two layouts agree everywhere but on symbols 62/63
    let standard = encode_to_string(&data, &STANDARD);
    let swapped: String = standard
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    assert_eq!(encoded, swapped);
}
