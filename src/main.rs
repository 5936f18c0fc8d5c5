//! Colbind CLI - decode CSV files into typed records
//!
//! ```bash
//! colbind decode input.csv          # Decode with the sample schema, print JSON
//! colbind decode input.csv -o out.json
//! colbind headers input.csv         # Show detected encoding and columns
//! ```
//!
//! The `decode` command uses a built-in sample schema that exercises every
//! coercion strategy; it exists to try the engine against a file, not as a
//! general-purpose tool.

use clap::{Parser, Subcommand};
use colbind::{csv_record, decode_path, detect_encoding, reader_from_str};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

csv_record! {
    /// Sample shape covering every coercion strategy.
    #[derive(Debug, Default, Serialize)]
    struct Sample {
        id: i64 => "id",
        name: String => "name",
        age: i64 => "age",
        salary: f64 => "salary",
        is_active: bool => "is_active",
        scores: Vec<i64> => "scores, list",
        tags: Vec<String> => "tags, list",
        metadata: serde_json::Value => "metadata, json",
        created_at: chrono::NaiveDateTime => "created_at, %Y-%m-%d",
        hex_value: Vec<u8> => "hex_value, hex",
        binary_data: Vec<u8> => "binary_data, binary",
    }
}

#[derive(Parser)]
#[command(name = "colbind")]
#[command(about = "Decode CSV files into typed records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a CSV file with the built-in sample schema and output JSON
    Decode {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the detected encoding and column names of a CSV file
    Headers {
        /// Input CSV file
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Decode { input, output } => cmd_decode(&input, output.as_deref()),
        Commands::Headers { input } => cmd_headers(&input),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_decode(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Decoding: {}", input.display());

    let records: Vec<Sample> = decode_path(input)?;
    eprintln!("✅ Decoded {} records", records.len());

    let json = serde_json::to_string_pretty(&records)?;
    match output {
        Some(path) => {
            fs::write(path, json)?;
            eprintln!("   Written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn cmd_headers(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(input)?;
    let encoding = detect_encoding(&bytes);
    let content = colbind::decode_content(&bytes, &encoding);

    let mut reader = reader_from_str(&content);
    let headers = reader.headers()?.clone();

    eprintln!("📄 {}", input.display());
    eprintln!("   Encoding: {}", encoding);
    eprintln!("   Columns: {}", headers.iter().collect::<Vec<_>>().join(", "));

    Ok(())
}
