use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Byte-level outcome of comparing two saved responses.
#[derive(Debug, PartialEq)]
pub enum Comparison {
    Identical { bytes: usize },
    Different {
        left_bytes: usize,
        right_bytes: usize,
        first_difference: usize,
    },
}

impl Comparison {
    pub fn of(left: &[u8], right: &[u8]) -> Self {
        let first_difference = left
            .iter()
            .zip(right)
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| left.len().min(right.len()));

        if first_difference == left.len() && left.len() == right.len() {
            Self::Identical { bytes: left.len() }
        } else {
            Self::Different {
                left_bytes: left.len(),
                right_bytes: right.len(),
                first_difference,
            }
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identical { bytes } => write!(f, "Responses identical ({bytes} bytes)"),
            Self::Different {
                left_bytes,
                right_bytes,
                first_difference,
            } => write!(
                f,
                "Responses differ ({left_bytes} vs {right_bytes} bytes, first difference at byte {first_difference})"
            ),
        }
    }
}

pub fn compare_files(left: &Path, right: &Path) -> io::Result<Comparison> {
    let left = fs::read(left)?;
    let right = fs::read(right)?;
    Ok(Comparison::of(&left, &right))
}
