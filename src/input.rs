use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;

/// Numbers separated by whitespace or commas. `#` starts a comment that runs
/// to the end of the line.
pub fn parse_values(text: &str) -> Result<Vec<f64>> {
    let mut xs = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default();
        for token in line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            let x = token
                .parse::<f64>()
                .with_context(|| format!("line {}: can't parse {token:?} as a number", n + 1))?;
            xs.push(x);
        }
    }
    Ok(xs)
}

pub fn read_values(path: &Path) -> Result<Vec<f64>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("can't read {}", path.display()))?;
    let xs = parse_values(&text).with_context(|| format!("in {}", path.display()))?;
    debug!(path = %path.display(), n = xs.len(), "read values");
    Ok(xs)
}

/// Values from `path` when given, otherwise the inline `values`.
pub fn values(path: Option<&Path>, values: Vec<f64>) -> Result<Vec<f64>> {
    match path {
        Some(path) if values.is_empty() => read_values(path),
        Some(_) => bail!("pass values inline or with --file, not both"),
        None => Ok(values),
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::{parse_values, read_values, values};

    #[test]
    fn parses_mixed_separators_and_comments() {
        let text = "# daily log returns\n0.01, -0.02 0.003\n\n1e-3\t-5 # tail\n";
        assert_eq!(
            parse_values(text).unwrap(),
            vec![0.01, -0.02, 0.003, 0.001, -5.0]
        );
    }

    #[test]
    fn reports_bad_token() {
        let err = parse_values("0.1\n0.2 abc\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "100\n101\n99.5").unwrap();
        assert_eq!(read_values(file.path()).unwrap(), vec![100.0, 101.0, 99.5]);
    }

    #[test]
    fn file_and_inline_are_exclusive() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(values(Some(file.path()), vec![1.0]).is_err());
        assert_eq!(values(None, vec![1.0]).unwrap(), vec![1.0]);
    }
}
