use anyhow::{Context, Result};
use partylogos::logo::process_logo_bytes;
use std::{env, fs, path::Path, process::exit};

const DEFAULT_SIZE: u32 = 512;

fn main() {
    // Expect an input image, an output path and an optional size.
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!("Usage: {} <INPUT_IMAGE> <OUTPUT_PNG> [SIZE]", args[0]);
        exit(1);
    }
    let size = match args.get(3).map(|s| s.parse::<u32>()) {
        None => DEFAULT_SIZE,
        Some(Ok(n)) if n > 0 => n,
        Some(_) => {
            eprintln!("SIZE must be a positive integer, got {:?}", args[3]);
            exit(1);
        }
    };
    if let Err(e) = crop_file(Path::new(&args[1]), Path::new(&args[2]), size) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

/// Read `input`, circle-crop it to `size`×`size` and write a PNG to `output`.
fn crop_file(input: &Path, output: &Path, size: u32) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let png = process_logo_bytes(&bytes, size)
        .with_context(|| format!("processing {}", input.display()))?;
    fs::write(output, &png).with_context(|| format!("writing {}", output.display()))?;
    println!("{} -> {} ({}x{})", input.display(), output.display(), size, size);
    Ok(())
}
