use feature_util::common_io::*;
use std::io::{BufRead, Write};

#[test]
fn atomic_write_test() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out_file = dir.path().join("nested").join("out.html");
    let out_file = out_file.to_str().unwrap();

    assert!(!file_exists(out_file));
    write_file_atomic(&["<div>", "plot", "</div>\n"], out_file)?;
    assert!(file_exists(out_file));
    assert_eq!(std::fs::read_to_string(out_file)?, "<div>plot</div>\n");

    // replace as a whole
    write_file_atomic(&[String::from("second")], out_file)?;
    assert_eq!(std::fs::read_to_string(out_file)?, "second");

    // no leftover temporary files
    let names: Vec<_> = std::fs::read_dir(dir.path().join("nested"))?
        .map(|e| e.map(|e| e.file_name()))
        .collect::<Result<_, _>>()?;
    assert_eq!(names.len(), 1);
    Ok(())
}

#[test]
fn gz_reader_test() -> anyhow::Result<()> {
    let gz_file = create_temp_dir_file("csv.gz")?;
    std::fs::create_dir_all(gz_file.parent().unwrap())?;

    {
        let file = std::fs::File::create(&gz_file)?;
        let mut enc = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        writeln!(enc, "x,y,z")?;
        writeln!(enc, "1,2,3")?;
        enc.finish()?;
    }

    let lines: Vec<String> = open_buf_reader(gz_file.to_str().unwrap())?
        .lines()
        .collect::<Result<_, _>>()?;
    assert_eq!(lines, vec!["x,y,z", "1,2,3"]);
    Ok(())
}

#[test]
fn missing_file_test() {
    assert!(open_buf_reader("/nonexistent/phate_representation.csv").is_err());
}
