// Integration tests for the chunking drivers
// Tests cover: push/finish semantics, coverage, size bounds, determinism,
// edit locality, hashing, edge cases

use std::collections::HashSet;
use std::io::Cursor;

use bytes::Bytes;
use cutpoint::{
    Chunk, ChunkConfig, ChunkError, ChunkHash, ChunkOptions, Chunker, ErrorKind, HashAlgorithm,
    HashConfig, Normalization, StreamChunker, chunk_reader,
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; len];
    rng.fill_bytes(&mut data);
    data
}

fn push_all(chunker: &mut StreamChunker, data: &[u8], step: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    for piece in data.chunks(step) {
        chunks.extend(chunker.push(piece));
    }
    chunks.extend(chunker.finish());
    chunks
}

fn assert_covers(chunks: &[Chunk], data: &[u8]) {
    let mut expected_offset = 0u64;
    for chunk in chunks {
        assert_eq!(chunk.offset, expected_offset, "chunks must be contiguous");
        let start = chunk.offset as usize;
        assert_eq!(&chunk.data[..], &data[start..start + chunk.len()]);
        expected_offset += chunk.len() as u64;
    }
    assert_eq!(expected_offset, data.len() as u64, "chunks must cover the input");
}

fn assert_bounds(chunks: &[Chunk], config: &ChunkConfig) {
    for (i, chunk) in chunks.iter().enumerate() {
        assert!(chunk.len() <= config.max_size(), "chunk {i} exceeds max_size");
        if i + 1 < chunks.len() {
            assert!(chunk.len() >= config.min_size(), "chunk {i} below min_size");
        }
    }
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[test]
fn test_empty_input() {
    let mut chunker = StreamChunker::new(ChunkConfig::default());

    assert!(chunker.push(&[]).is_empty(), "Empty input should produce no chunks");
    assert_eq!(chunker.pending_len(), 0);
    assert!(
        chunker.finish().is_none(),
        "finish() on empty state should return None"
    );
}

#[test]
fn test_short_input_is_one_chunk() {
    let config = ChunkConfig::new(1024, 4096, 65536).unwrap();
    let data = random_bytes(1, 1000);

    let chunks = Chunker::new(config).chunk_bytes(data.clone());

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].offset, 0);
    assert_eq!(chunks[0].len(), 1000);
    assert_eq!(chunks[0].hash, HashAlgorithm::Blake3.digest(&data));
}

#[test]
fn test_small_random_stream() {
    let config = ChunkConfig::new(1024, 4096, 65536).unwrap();
    let data = random_bytes(2, 10_240);

    let chunks = Chunker::new(config).chunk_bytes(data.clone());

    assert!(!chunks.is_empty());
    assert_covers(&chunks, &data);
    assert_bounds(&chunks, &config);
}

// ============================================================================
// Streaming and Push/Finish Semantics
// ============================================================================

#[test]
fn test_pending_bytes_carried_between_pushes() {
    let config = ChunkConfig::new(64, 256, 1024).unwrap();
    let mut chunker = StreamChunker::new(config);
    let data = random_bytes(3, 5000);

    let first = chunker.push(&data[..3000]);
    let emitted: usize = first.iter().map(|c| c.len()).sum();
    assert_eq!(chunker.pending_len(), 3000 - emitted);
    assert!(chunker.pending_len() <= config.max_size());

    let mut chunks = first;
    chunks.extend(chunker.push(&data[3000..]));
    chunks.extend(chunker.finish());
    assert_covers(&chunks, &data);
}

#[test]
fn test_multiple_finish_calls() {
    let mut chunker = StreamChunker::new(ChunkConfig::new(4, 16, 64).unwrap());
    chunker.push(b"abc");

    assert!(chunker.finish().is_some());
    assert!(chunker.finish().is_none(), "second finish() has nothing left");
}

#[test]
fn test_offset_resets_after_reset() {
    let config = ChunkConfig::new(64, 256, 1024).unwrap();
    let data = random_bytes(4, 4000);
    let mut chunker = StreamChunker::new(config);

    let first = push_all(&mut chunker, &data, 4000);
    assert_eq!(chunker.offset(), 4000);

    chunker.reset();
    let second = push_all(&mut chunker, &data, 4000);
    assert_eq!(first, second);
}

// ============================================================================
// Size Constraints
// ============================================================================

#[test]
fn test_size_bounds_random() {
    for normalization in [
        Normalization::Level0,
        Normalization::Level1,
        Normalization::Level2,
        Normalization::Level3,
    ] {
        let config = ChunkConfig::new(256, 1024, 4096)
            .unwrap()
            .with_normalization(normalization);
        let data = random_bytes(5, 300_000);

        let chunks = Chunker::new(config).chunk_bytes(data.clone());
        assert_covers(&chunks, &data);
        assert_bounds(&chunks, &config);
    }
}

#[test]
fn test_max_size_enforces_boundary() {
    let config = ChunkConfig::new(64, 256, 1024).unwrap();
    let data = vec![0u8; 10_000];

    let chunks = Chunker::new(config).chunk_bytes(data.clone());

    assert!(chunks.len() >= 10_000 / 1024);
    assert_covers(&chunks, &data);
    assert_bounds(&chunks, &config);
}

#[test]
fn test_average_size_near_target() {
    let config = ChunkConfig::new(1024, 4096, 16384).unwrap();
    let data = random_bytes(6, 4 * 1024 * 1024);

    let chunks = Chunker::new(config).chunk_bytes(data.clone());
    let mean = data.len() / chunks.len();

    assert!(
        (2048..=8192).contains(&mean),
        "mean chunk size {mean} far from 4096"
    );
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_determinism_across_push_sizes() {
    let config = ChunkConfig::new(256, 1024, 4096).unwrap();
    let data = random_bytes(7, 100_000);
    let reference = Chunker::new(config).chunk_bytes(data.clone());

    for step in [1, 7, 255, 1024, 4097, 65536, data.len()] {
        let mut chunker = StreamChunker::new(config);
        assert_eq!(
            push_all(&mut chunker, &data, step),
            reference,
            "push size {step} changed the chunks"
        );
    }
}

#[test]
fn test_same_stream_same_chunks_same_hashes() {
    let config = ChunkConfig::new(256, 1024, 4096).unwrap();
    let data = random_bytes(8, 50_000);

    let a = Chunker::new(config).chunk_bytes(data.clone());
    let b: Vec<_> = Chunker::new(config)
        .chunk(Cursor::new(&data))
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(a, b);
}

// ============================================================================
// Locality
// ============================================================================

#[test]
fn test_insertion_only_disturbs_nearby_chunks() {
    let config = ChunkConfig::new(256, 1024, 4096).unwrap();
    let original = random_bytes(9, 400_000);
    let insert_at = 150_000;

    let mut edited = original[..insert_at].to_vec();
    edited.extend_from_slice(&random_bytes(10, 37));
    edited.extend_from_slice(&original[insert_at..]);

    let chunker = Chunker::new(config);
    let before = chunker.chunk_bytes(original);
    let after = chunker.chunk_bytes(edited);

    // Chunks ending before the edit cannot see it.
    let untouched: Vec<_> = before
        .iter()
        .take_while(|c| c.end() <= insert_at as u64)
        .collect();
    assert!(!untouched.is_empty());
    for (a, b) in untouched.iter().zip(&after) {
        assert_eq!(a.hash, b.hash);
        assert_eq!(a.offset, b.offset);
    }

    // One max_size window past the edit, boundaries have resynchronized.
    let after_hashes: HashSet<ChunkHash> = after.iter().map(|c| c.hash).collect();
    let tail: Vec<_> = before
        .iter()
        .filter(|c| c.offset > (insert_at + config.max_size()) as u64)
        .collect();
    assert!(!tail.is_empty());
    for chunk in tail {
        assert!(
            after_hashes.contains(&chunk.hash),
            "chunk at {} changed by an insertion at {insert_at}",
            chunk.offset
        );
    }
}

// ============================================================================
// Zero-Copy Verification
// ============================================================================

#[test]
fn test_chunk_bytes_is_zero_copy() {
    let data = Bytes::from(random_bytes(11, 20_000));
    let range = data.as_ptr() as usize..data.as_ptr() as usize + data.len();

    let chunks = Chunker::new(ChunkConfig::new(256, 1024, 4096).unwrap()).chunk_bytes(data.clone());

    for chunk in &chunks {
        let ptr = chunk.data.as_ptr() as usize;
        assert!(range.contains(&ptr), "chunk data should slice the input");
    }
}

// ============================================================================
// Hashing Tests
// ============================================================================

#[test]
fn test_hash_is_digest_of_chunk_bytes() {
    let config = ChunkConfig::new(256, 1024, 4096).unwrap();
    let data = random_bytes(12, 30_000);

    for chunk in Chunker::new(config).chunk_bytes(data) {
        assert_eq!(chunk.hash, HashAlgorithm::Blake3.digest(&chunk.data));
        assert_eq!(chunk.hash.to_hex().len(), 64);
    }
}

#[test]
fn test_identical_content_identical_hash() {
    let config = ChunkConfig::new(64, 256, 1024).unwrap();
    let chunker = Chunker::new(config);

    let a = chunker.chunk_bytes(vec![0x5au8; 500]);
    let b = chunker.chunk_bytes(vec![0x5au8; 500]);
    assert_eq!(
        a.iter().map(|c| c.hash).collect::<Vec<_>>(),
        b.iter().map(|c| c.hash).collect::<Vec<_>>()
    );
}

#[cfg(feature = "sha256")]
#[test]
fn test_sha256_chunks() {
    let config = ChunkConfig::new(64, 256, 1024)
        .unwrap()
        .with_hash_config(HashConfig::sha256());
    let data = random_bytes(13, 5000);

    let blake =
        Chunker::new(config.with_hash_config(HashConfig::blake3())).chunk_bytes(data.clone());
    let sha = Chunker::new(config).chunk_bytes(data);

    assert_eq!(blake.len(), sha.len(), "digest choice must not move boundaries");
    for (b, s) in blake.iter().zip(&sha) {
        assert_eq!(b.span(), s.span());
        assert_eq!(s.hash, HashAlgorithm::Sha256.digest(&s.data));
    }
}

// ============================================================================
// Edge Cases and Error Conditions
// ============================================================================

#[test]
fn test_config_validation() {
    assert!(ChunkConfig::new(0, 16, 64).is_err());
    assert!(ChunkConfig::new(32, 16, 64).is_err());
    assert!(ChunkConfig::new(4, 128, 64).is_err());

    let err = ChunkConfig::default().with_min_size(1 << 20).validate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_options_resolution() {
    let config = ChunkOptions::new().resolve().unwrap();
    assert_eq!(
        (config.min_size(), config.avg_size(), config.max_size()),
        (256, 1024, 4096)
    );

    let err = ChunkOptions::new().max(512).resolve().unwrap_err();
    assert!(matches!(
        err,
        ChunkError::OutOfRange {
            name: "max_size",
            ..
        }
    ));
}

#[test]
fn test_chunk_reader_results() {
    let config = ChunkConfig::new(256, 1024, 4096).unwrap();
    let data = random_bytes(14, 25_000);

    let results = chunk_reader(Cursor::new(&data), config, None).unwrap();
    let chunks = Chunker::new(config).chunk_bytes(data);

    assert_eq!(results.len(), chunks.len());
    for (r, c) in results.iter().zip(&chunks) {
        assert_eq!(*r, c.result());
    }
}

#[test]
fn test_default_hash_config() {
    assert_eq!(ChunkConfig::default().hash_config(), &HashConfig::default());
    assert_eq!(HashConfig::default().algorithm, HashAlgorithm::Blake3);
}
