use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use walkdir::WalkDir;

use qrsvg::{Converter, ImageRaster, RasterOptions};

#[derive(Debug, Default, Clone)]
struct Tally {
    images: usize,
    detected: usize,
    matched: usize,
    labelled: usize,
    failed: usize,
    runtimes: Vec<u128>,
}

fn is_image_file(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file()
        && entry
            .path()
            .extension()
            .map(|e| matches!(e.to_str(), Some("png" | "jpg" | "jpeg" | "bmp" | "gif")))
            .unwrap_or(false)
}

fn get_parent(path: &Path) -> String {
    path.parent()
        .and_then(|p| p.file_name())
        .and_then(|s| s.to_str())
        .unwrap_or("<root>")
        .to_string()
}

/// Expected module count stored next to the image as `<name>.txt`.
fn expected_steps(img_path: &Path) -> Option<u32> {
    let content = std::fs::read_to_string(img_path.with_extension("txt")).ok()?;
    content.split_whitespace().next()?.parse().ok()
}

fn benchmark(dataset_dir: &Path) {
    let image_paths: Vec<PathBuf> = WalkDir::new(dataset_dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(is_image_file)
        .map(|e| e.path().to_path_buf())
        .collect();

    if image_paths.is_empty() {
        println!("No images under {}", dataset_dir.display());
        return;
    }

    let converter = Converter::builder().build().unwrap();
    let results = Mutex::new(BTreeMap::<String, Tally>::new());

    image_paths.par_iter().for_each(|img_path| {
        let parent = get_parent(img_path);
        let exp = expected_steps(img_path);

        let start = Instant::now();
        let res = ImageRaster::open(img_path, RasterOptions::default())
            .and_then(|raster| converter.convert(raster));
        let elapsed = start.elapsed().as_millis();

        let mut results = results.lock().unwrap();
        let tally = results.entry(parent).or_default();
        tally.images += 1;
        tally.runtimes.push(elapsed);
        tally.labelled += exp.is_some() as usize;
        match res {
            Ok(conv) if conv.detected() => {
                tally.detected += 1;
                tally.matched += (exp == Some(*conv.steps())) as usize;
            }
            Ok(_) => {}
            Err(e) => {
                tally.failed += 1;
                println!("{}: {e}", img_path.display());
            }
        }
    });

    print_table(&results.into_inner().unwrap());
}

fn print_table(results: &BTreeMap<String, Tally>) {
    let cell_w = 12;
    let columns = ["Folder", "Images", "Detected", "Matched", "Failed", "Avg ms"];
    let divider = "-".repeat(columns.len() * (cell_w + 2) + 1);

    println!("{divider}");
    let mut header = String::from("| ");
    for c in columns {
        header.push_str(&format!("{c:<cell_w$}| "));
    }
    println!("{header}");
    println!("{divider}");

    for (folder, t) in results {
        let avg = t.runtimes.iter().sum::<u128>() as f64 / t.runtimes.len().max(1) as f64;
        let matched = format!("{}/{}", t.matched, t.labelled);
        println!(
            "| {folder:<cell_w$}| {:<cell_w$}| {:<cell_w$}| {matched:<cell_w$}| {:<cell_w$}| {avg:<cell_w$.2}| ",
            t.images, t.detected, t.failed
        );
    }

    println!("{divider}");
}

fn main() {
    let dataset = std::env::args()
        .skip(1)
        .find(|a| !a.starts_with('-'))
        .unwrap_or_else(|| "benches/dataset".to_string());

    println!("Running qrsvg conversion benchmark on {dataset}");
    let start = Instant::now();
    benchmark(Path::new(&dataset));
    println!("Total time elapsed: {:?}", start.elapsed());
}
