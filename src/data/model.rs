use std::fmt;

// ---------------------------------------------------------------------------
// Dataset – the loaded value column
// ---------------------------------------------------------------------------

/// Name of the only column read from input files.
pub const VALUE_COLUMN: &str = "value";

/// An ordered single-column numeric dataset.
///
/// Row order is the file order and defines the positional index used by
/// every parity- or position-dependent rule downstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    values: Vec<f64>,
}

impl Dataset {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// The `value` column.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<f64>> for Dataset {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

// ---------------------------------------------------------------------------
// Level – derived per-row label
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => write!(f, "Low"),
            Level::Medium => write!(f, "Medium"),
            Level::High => write!(f, "High"),
        }
    }
}

// ---------------------------------------------------------------------------
// ClassifiedTable – value column plus its Level column
// ---------------------------------------------------------------------------

/// One row of the classified table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedRow {
    pub value: f64,
    pub level: Level,
}

/// The dataset with its derived `Level` column, in row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedTable {
    pub rows: Vec<ClassifiedRow>,
}

impl ClassifiedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `Level` column.
    pub fn levels(&self) -> impl Iterator<Item = Level> + '_ {
        self.rows.iter().map(|r| r.level)
    }

    /// Number of rows carrying `level`.
    pub fn count(&self, level: Level) -> usize {
        self.levels().filter(|l| *l == level).count()
    }
}
