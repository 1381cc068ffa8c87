#![no_main]

use std::io::Cursor;

use cutpoint::{ChunkConfig, Chunker, HashAlgorithm, StreamChunker};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u16, Vec<u8>)| {
    let (split, data) = input;
    let configs = [
        ChunkConfig::new(4, 16, 64).unwrap(),
        ChunkConfig::new(64, 256, 1024).unwrap(),
        ChunkConfig::new(256, 4096, 16384).unwrap(),
        ChunkConfig::default(),
    ];

    for config in configs {
        let chunker = Chunker::new(config);
        let reference = chunker.chunk_bytes(data.clone());

        // Bounds, coverage and digests
        let mut expected_offset = 0u64;
        for (i, chunk) in reference.iter().enumerate() {
            assert!(chunk.len() <= config.max_size());
            if i + 1 < reference.len() {
                assert!(chunk.len() >= config.min_size());
            }
            assert_eq!(chunk.offset, expected_offset);
            assert_eq!(chunk.hash, HashAlgorithm::Blake3.digest(&chunk.data));
            expected_offset += chunk.len() as u64;
        }
        assert_eq!(expected_offset, data.len() as u64);

        // Reader driver sees the same chunks
        let from_reader: Vec<_> = chunker
            .chunk(Cursor::new(&data))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(from_reader, reference);

        // So does the push engine, whatever the split
        let step = usize::from(split).max(1);
        let mut engine = StreamChunker::new(config);
        let mut pushed = Vec::new();
        for piece in data.chunks(step) {
            pushed.extend(engine.push(piece));
        }
        pushed.extend(engine.finish());
        assert_eq!(pushed, reference);
    }
});
