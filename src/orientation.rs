use serde::Deserialize;

/// Which side of a `left=right` mapping line names the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    #[default]
    SourceFirst,
    DestFirst,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::SourceFirst => "source-first",
            Orientation::DestFirst => "dest-first",
        }
    }

    /// Returns `(source, destination)` for the two sides of a mapping line.
    pub fn split<'a>(&self, left: &'a str, right: &'a str) -> (&'a str, &'a str) {
        match self {
            Orientation::SourceFirst => (left, right),
            Orientation::DestFirst => (right, left),
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
