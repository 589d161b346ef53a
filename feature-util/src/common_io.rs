use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tempfile::tempdir;

///
/// Open a file for reading, and return a buffered reader
/// * `input_file` - file name--either gzipped or not
pub fn open_buf_reader(input_file: &str) -> anyhow::Result<Box<dyn BufRead>> {
    let ext = Path::new(input_file).extension().and_then(|x| x.to_str());

    let file = File::open(input_file)
        .map_err(|e| anyhow::anyhow!("failed to open {}: {}", input_file, e))?;

    match ext {
        Some("gz") => Ok(Box::new(BufReader::new(GzDecoder::new(file)))),
        _ => Ok(Box::new(BufReader::new(file))),
    }
}

///
/// Write all the `chunks` into `output_file` as a whole.
///
/// The content goes to a temporary file next to the destination
/// first, then gets renamed, so `output_file` either does not exist
/// or is complete.
///
/// * `chunks` - pieces of text concatenated in order
/// * `output_file` - file name
///
pub fn write_file_atomic<S>(chunks: &[S], output_file: &str) -> anyhow::Result<()>
where
    S: AsRef<str>,
{
    let path = Path::new(output_file);
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut temp = tempfile::Builder::new()
        .prefix(".partial-")
        .tempfile_in(dir)?;

    {
        let mut buf = std::io::BufWriter::new(temp.as_file_mut());
        for s in chunks {
            buf.write_all(s.as_ref().as_bytes())?;
        }
        buf.flush()?;
    }

    temp.persist(path)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {}", output_file, e))?;
    Ok(())
}

///
/// Check if a file exists
/// * `file` - file name
///
pub fn file_exists(file: &str) -> bool {
    Path::new(file).is_file()
}

///
/// Create a temporary directory and suggest a file name
/// * `suffix` - suffix of the file name
///
pub fn create_temp_dir_file(suffix: &str) -> anyhow::Result<std::path::PathBuf> {
    let temp_dir = tempdir()?.path().to_path_buf();
    std::fs::create_dir_all(&temp_dir)?;
    let temp_file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile_in(temp_dir)?
        .path()
        .to_owned();

    Ok(temp_file)
}
