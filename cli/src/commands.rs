use figura::math::{Transform, Vector};
use figura::path::{FormatOptions, Path};
use figura::svg::ParseError;

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Invalid path: {0}")]
    Parse(#[from] ParseError),
    #[error("Invalid argument {name}: {src:?}")]
    Argument { name: &'static str, src: String },
}

pub struct ShowCmd {
    pub path: Path,
    pub output: Box<dyn io::Write>,
    pub format: FormatOptions,
    pub count: bool,
}

pub struct BoundsCmd {
    pub path: Path,
    pub output: Box<dyn io::Write>,
}

pub struct SplitCmd {
    pub path: Path,
    pub output: Box<dyn io::Write>,
    pub format: FormatOptions,
    pub at: f64,
    pub subdivide: bool,
}

pub struct LerpCmd {
    pub from: Path,
    pub to: Path,
    pub output: Box<dyn io::Write>,
    pub format: FormatOptions,
    pub at: f64,
    pub steps: Option<usize>,
}

pub struct TransformCmd {
    pub path: Path,
    pub output: Box<dyn io::Write>,
    pub format: FormatOptions,
    pub transform: Transform,
}

/// Parses `"x,y"` or `"x y"`.
pub fn parse_pair(src: &str) -> Result<Vector, String> {
    let mut values = src
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().map_err(|e| e.to_string()));

    match (values.next(), values.next(), values.next()) {
        (Some(x), Some(y), None) => Ok(Vector::new(x?, y?)),
        _ => Err(format!("expected two numbers, got {src:?}")),
    }
}

#[test]
fn pairs() {
    assert_eq!(parse_pair("1,2"), Ok(Vector::new(1.0, 2.0)));
    assert_eq!(parse_pair(" -1.5  2e1 "), Ok(Vector::new(-1.5, 20.0)));
    assert!(parse_pair("1").is_err());
    assert!(parse_pair("1,2,3").is_err());
    assert!(parse_pair("1,x").is_err());
}
