//! The success message of a completed check.

use std::fmt;

/// How much of the world supply a successful check covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// A finite supply was exhausted: every world passed.
    AllWorlds { total: u64 },
    /// The time budget ran out first: `checked` sampled worlds passed, out
    /// of `total` distinct worlds when that count is known.
    Sampled { checked: u64, total: Option<u64> },
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::AllWorlds { total } => {
                write!(f, "checked all {total} possible worlds")
            }
            Verdict::Sampled {
                checked,
                total: None,
            } => write!(f, "checked {checked} random worlds"),
            Verdict::Sampled {
                checked,
                total: Some(total),
            } => write!(f, "checked {checked} random worlds\nfrom {total} possible worlds"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_all_worlds() {
        assert_eq!(
            Verdict::AllWorlds { total: 8 }.to_string(),
            "checked all 8 possible worlds"
        );
    }

    #[test]
    fn display_sampled_unknown_total() {
        assert_eq!(
            Verdict::Sampled {
                checked: 1234,
                total: None
            }
            .to_string(),
            "checked 1234 random worlds"
        );
    }

    #[test]
    fn display_sampled_known_total() {
        assert_eq!(
            Verdict::Sampled {
                checked: 100,
                total: Some(256)
            }
            .to_string(),
            "checked 100 random worlds\nfrom 256 possible worlds"
        );
    }
}
