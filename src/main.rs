//! notepress – release notes YAML → PDF generator.
//!
//! Usage:
//!   notepress [input.yaml] [output.pdf] [--title "My Notes"]
//!
//! Both paths are optional; the input defaults to `newsData.yaml` next to
//! the executable and the output to `CCDI_Hub_Release_Notes.pdf` next to the
//! input, so the tool can be dropped into a data directory and run with no
//! arguments. Logo assets are looked up alongside the input file.

use std::{env, path::PathBuf, process};

use notepress::{generate_to_file, PdfMetadata, RenderOptions};

const DEFAULT_INPUT: &str = "newsData.yaml";
const DEFAULT_OUTPUT: &str = "CCDI_Hub_Release_Notes.pdf";

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut title: Option<String> = None;
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1).peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--title" | "-t" => match iter.next() {
                Some(v) => title = Some(v.clone()),
                None => {
                    eprintln!("Error: --title requires a value.");
                    process::exit(1);
                }
            },
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                if positional == 0 {
                    input_path = Some(PathBuf::from(path));
                } else if positional == 1 {
                    output_path = Some(PathBuf::from(path));
                } else {
                    eprintln!("Unexpected argument: {path}");
                    print_usage(&args[0]);
                    process::exit(1);
                }
                positional += 1;
            }
        }
    }

    // Defaults live next to the executable, falling back to the current
    // directory when the executable path is unavailable.
    let base_dir = env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));

    let input = input_path.unwrap_or_else(|| base_dir.join(DEFAULT_INPUT));

    // Assets and the default output live alongside the input file.
    let input_dir = input
        .parent()
        .map(PathBuf::from)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from("."));
    let output = output_path.unwrap_or_else(|| input_dir.join(DEFAULT_OUTPUT));
    let asset_dir = input_dir;

    let mut metadata = PdfMetadata::default();
    if let Some(t) = title {
        metadata.title = t;
    }

    let options = RenderOptions {
        metadata,
        asset_dir,
    };

    match generate_to_file(&input, &output, &options) {
        Ok(layout) => {
            let pages = layout.pages.len();
            eprintln!(
                "Wrote '{}' ({} page{})",
                output.display(),
                pages,
                if pages == 1 { "" } else { "s" }
            );
        }
        Err(e) => {
            eprintln!("Error generating release notes PDF: {e}");
            process::exit(1);
        }
    }
}

fn print_usage(prog: &str) {
    eprintln!("notepress – release notes YAML to PDF generator");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} [input.yaml] [output.pdf] [--title \"My Notes\"]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [input.yaml]   Release notes source (default: {DEFAULT_INPUT} next to the executable)");
    eprintln!("  [output.pdf]   Output path (default: {DEFAULT_OUTPUT} next to the input)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --title, -t    Document title in PDF metadata");
    eprintln!("  --help         Print this message");
}
