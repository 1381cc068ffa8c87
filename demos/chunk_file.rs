//! File chunking demo.
//!
//! Run with:
//!     cargo run --example chunk_file -- /path/to/file [output_dir] [avg_size]
//!
//! Prints one line per chunk and, when `output_dir` is given, stores every
//! distinct chunk there as `<output_dir>/<hash>`.

use std::env;
use std::path::PathBuf;

use cutpoint::{ChunkOptions, chunk_file};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "Cargo.toml".to_string());
    let output_dir = args.next().map(PathBuf::from);
    let options = match args.next() {
        Some(avg) => ChunkOptions::from_avg(avg.parse()?),
        None => ChunkOptions::new(),
    };

    let config = options.resolve()?;
    println!(
        "Chunking {path} (min={}, avg={}, max={})\n",
        config.min_size(),
        config.avg_size(),
        config.max_size()
    );

    let results = chunk_file(&path, config, output_dir.as_deref())?;

    for (i, r) in results.iter().enumerate() {
        println!(
            "Chunk {:>4}: offset={:>10}, len={:>8}, hash={}",
            i + 1,
            r.offset,
            r.length,
            r.hash
        );
    }

    let total: usize = results.iter().map(|r| r.length).sum();
    println!("\n{} chunks, {} bytes", results.len(), total);
    if !results.is_empty() {
        println!("average chunk size: {} bytes", total / results.len());
    }
    Ok(())
}
