//! Plain-text input and output, gzipped or not.

use crate::common::*;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

///
/// Open a file for reading, and return a buffered reader
/// * `input_file` - file name--either gzipped or not
///
pub fn open_buf_reader(input_file: &str) -> anyhow::Result<Box<dyn BufRead>> {
    let file = File::open(input_file)
        .map_err(|e| anyhow::anyhow!("failed to open {}: {}", input_file, e))?;
    match Path::new(input_file).extension().and_then(|x| x.to_str()) {
        Some("gz") => Ok(Box::new(BufReader::new(GzDecoder::new(file)))),
        _ => Ok(Box::new(BufReader::new(file))),
    }
}

///
/// Open a file for writing, and return a buffered writer
/// * `output_file` - file name--either gzipped or not; `stdout` works too
///
pub fn open_buf_writer(output_file: &str) -> anyhow::Result<Box<dyn Write>> {
    if output_file.eq_ignore_ascii_case("stdout") {
        return Ok(Box::new(BufWriter::new(std::io::stdout())));
    }

    let file = File::create(output_file)?;
    match Path::new(output_file).extension().and_then(|x| x.to_str()) {
        Some("gz") => {
            let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
            Ok(Box::new(BufWriter::new(encoder)))
        }
        _ => Ok(Box::new(BufWriter::new(file))),
    }
}

///
/// Create the parent directory of a file if needed
///
pub fn mkdir(file: &str) -> anyhow::Result<()> {
    if let Some(dir) = Path::new(file).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}

fn is_data_line(line: &str) -> bool {
    !(line.trim().is_empty() || line.starts_with('#') || line.starts_with('%'))
}

///
/// Read a numeric matrix, one sample per line
/// * `input_file` - file name--either gzipped or not
/// * `delim` - column separators
/// * `header` - skip the first data line
///
pub fn read_matrix(input_file: &str, delim: &[char], header: bool) -> anyhow::Result<Mat> {
    let buf = open_buf_reader(input_file)?;

    let mut rows: Vec<Vec<f32>> = vec![];
    let mut skip = header;
    for (lineno, line) in buf.lines().enumerate() {
        let line = line?;
        if !is_data_line(&line) {
            continue;
        }
        if skip {
            skip = false;
            continue;
        }
        let row = line
            .split(delim)
            .filter(|w| !w.is_empty())
            .map(|w| {
                w.trim().parse::<f32>().map_err(|e| {
                    anyhow::anyhow!("{}:{}: cannot parse `{}`: {}", input_file, lineno + 1, w, e)
                })
            })
            .collect::<anyhow::Result<Vec<f32>>>()?;
        rows.push(row);
    }

    if rows.is_empty() {
        anyhow::bail!("No data in file {}", input_file);
    }

    let ncols = rows[0].len();
    if let Some(bad) = rows.iter().position(|r| r.len() != ncols) {
        anyhow::bail!(
            "{}: row {} has {} columns, expected {}",
            input_file,
            bad + 1,
            rows[bad].len(),
            ncols
        );
    }

    let nrows = rows.len();
    info!("read {} x {} matrix from {}", nrows, ncols, input_file);
    Ok(Mat::from_row_iterator(nrows, ncols, rows.into_iter().flatten()))
}

///
/// Write a matrix, one sample per line
///
pub fn write_matrix(data: &Mat, output_file: &str, delim: &str) -> anyhow::Result<()> {
    let mut buf = open_buf_writer(output_file)?;
    for row in data.row_iter() {
        let line = row
            .iter()
            .map(|x| x.to_string())
            .collect::<Vec<_>>()
            .join(delim);
        writeln!(buf, "{}", line)?;
    }
    buf.flush()?;
    Ok(())
}

///
/// Read labels, one integer per line
///
pub fn read_labels(input_file: &str) -> anyhow::Result<Vec<usize>> {
    let buf = open_buf_reader(input_file)?;

    let mut values = vec![];
    for (lineno, line) in buf.lines().enumerate() {
        let line = line?;
        if !is_data_line(&line) {
            continue;
        }
        let x = line.trim().parse::<i64>().map_err(|e| {
            anyhow::anyhow!("{}:{}: not an integer label: {}", input_file, lineno + 1, e)
        })?;
        values.push(x);
    }

    Ok(label_match::labels_from_signed(&values)?)
}

///
/// Write labels, one per line
///
pub fn write_labels(labels: &[usize], output_file: &str) -> anyhow::Result<()> {
    let mut buf = open_buf_writer(output_file)?;
    for x in labels {
        writeln!(buf, "{}", x)?;
    }
    buf.flush()?;
    Ok(())
}

///
/// Serialize a record to pretty-printed JSON
///
pub fn write_json<T: serde::Serialize>(record: &T, output_file: &str) -> anyhow::Result<()> {
    let mut buf = open_buf_writer(output_file)?;
    serde_json::to_writer_pretty(&mut buf, record)?;
    writeln!(buf)?;
    buf.flush()?;
    Ok(())
}
