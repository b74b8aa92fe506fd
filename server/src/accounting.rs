/// Destination-directory accounting for completed retrievals.
use std::fs;
use std::io;
use std::path::Path;

/// One counted output file.
#[derive(Debug, Clone)]
pub struct OutputFile {
    pub name: String,
    pub size_bytes: u64,
}

/// List `dir`, keep regular files with the expected container extension,
/// and return them name-sorted with their byte sizes. Sidecar files
/// (info JSON, partial downloads) fall outside the filter and are not
/// counted.
pub fn collect_output_files(dir: &Path, container: &str) -> io::Result<Vec<OutputFile>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(container))
            .unwrap_or(false);
        if !matches {
            continue;
        }

        files.push(OutputFile {
            name: entry.file_name().to_string_lossy().into_owned(),
            size_bytes: entry.metadata()?.len(),
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Convert a byte total to megabytes rounded to one decimal place.
pub fn to_mb_rounded(bytes: u64) -> f64 {
    (bytes as f64 / (1024.0 * 1024.0) * 10.0).round() / 10.0
}
