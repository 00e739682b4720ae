use reval::common::Mat;
use reval::io::*;
use std::io::Write;

#[test]
fn labels_survive_gzip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let file = dir.path().join("lab.gz");
    let file = file.to_str().ok_or_else(|| anyhow::anyhow!("path"))?;

    let labels = vec![3, 0, 0, 7, 1];
    write_labels(&labels, file)?;
    assert_eq!(read_labels(file)?, labels);
    Ok(())
}

#[test]
fn negative_labels_are_rejected() -> anyhow::Result<()> {
    let mut tmp = tempfile::NamedTempFile::new()?;
    writeln!(tmp, "0\n-1\n2")?;
    let file = tmp.path().to_str().ok_or_else(|| anyhow::anyhow!("path"))?;
    assert!(read_labels(file).is_err());
    Ok(())
}

#[test]
fn matrix_with_header_and_comments() -> anyhow::Result<()> {
    let mut tmp = tempfile::NamedTempFile::new()?;
    writeln!(tmp, "# simulated")?;
    writeln!(tmp, "a\tb\tc")?;
    writeln!(tmp, "1\t2\t3")?;
    writeln!(tmp)?;
    writeln!(tmp, "4,5,6")?;
    let file = tmp.path().to_str().ok_or_else(|| anyhow::anyhow!("path"))?;

    let x = read_matrix(file, &['\t', ','], true)?;
    assert_eq!(x, Mat::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]));
    Ok(())
}

#[test]
fn ragged_matrix_is_an_error() -> anyhow::Result<()> {
    let mut tmp = tempfile::NamedTempFile::new()?;
    writeln!(tmp, "1 2 3")?;
    writeln!(tmp, "4 5")?;
    let file = tmp.path().to_str().ok_or_else(|| anyhow::anyhow!("path"))?;
    assert!(read_matrix(file, &[' '], false).is_err());
    Ok(())
}

#[test]
fn written_matrix_reads_back() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let file = dir.path().join("sub").join("x.tsv.gz");
    let file = file.to_str().ok_or_else(|| anyhow::anyhow!("path"))?;

    let x = Mat::from_row_slice(2, 2, &[0.5, -1.0, 2.25, 8.0]);
    mkdir(file)?;
    write_matrix(&x, file, "\t")?;
    assert_eq!(read_matrix(file, &['\t'], false)?, x);
    Ok(())
}
