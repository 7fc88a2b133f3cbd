/// Logical value type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cast {
    String,
    Integer,
    Numeric,
    Binary,
    /// Calendar date, carried as Unix seconds at midnight UTC
    Date,
    /// Date and time of day, carried as Unix seconds
    Time,
    /// Unix seconds stored in an integer column
    Timestamp,
}

impl Cast {
    /// Returns `false` for types whose storage has no declared size.
    pub fn accepts_size(self) -> bool {
        !matches!(self, Cast::Date | Cast::Time | Cast::Binary)
    }

    pub fn accepts_default(self) -> bool {
        !matches!(self, Cast::Binary)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Cast::String => "STRING",
            Cast::Integer => "INTEGER",
            Cast::Numeric => "NUMERIC",
            Cast::Binary => "BINARY",
            Cast::Date => "DATE",
            Cast::Time => "TIME",
            Cast::Timestamp => "TIMESTAMP",
        }
    }
}

impl core::fmt::Display for Cast {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
