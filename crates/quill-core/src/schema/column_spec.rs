use super::{Cast, Model};

/// Size declared for TIMESTAMP columns, stored as integers.
const TIMESTAMP_SIZE: u32 = 10;

/// One-letter, dialect-neutral column type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCode {
    /// `C`, character data
    String,
    /// `I`
    Integer,
    /// `N`
    Numeric,
    /// `X`, binary data
    Binary,
    /// `D`
    Date,
    /// `T`
    Time,
}

impl TypeCode {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeCode::String => "C",
            TypeCode::Integer => "I",
            TypeCode::Numeric => "N",
            TypeCode::Binary => "X",
            TypeCode::Date => "D",
            TypeCode::Time => "T",
        }
    }
}

/// A physical column derived from a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub code: TypeCode,
    pub size: Option<u32>,
    pub nullable: bool,
    pub primary_key: bool,
}

/// The column list of a model's table, handed to the DDL executor.
///
/// Renders as `name code[(size)][ KEY]` entries joined by `, `.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub columns: Vec<ColumnDef>,
}

impl ColumnSpec {
    /// Translates the model's fields, skipping associative fields.
    pub fn from_model(model: &Model) -> ColumnSpec {
        let columns = model
            .columns()
            .map(|field| {
                let (code, size) = match field.cast() {
                    Cast::String => (TypeCode::String, field.size()),
                    Cast::Integer => (TypeCode::Integer, field.size()),
                    Cast::Numeric => (TypeCode::Numeric, field.size()),
                    Cast::Binary => (TypeCode::Binary, None),
                    Cast::Date => (TypeCode::Date, None),
                    Cast::Time => (TypeCode::Time, None),
                    Cast::Timestamp => (TypeCode::Integer, Some(TIMESTAMP_SIZE)),
                };

                ColumnDef {
                    name: field.name().to_string(),
                    code,
                    size,
                    nullable: field.nullable(),
                    primary_key: field.is_primary_key(),
                }
            })
            .collect();

        ColumnSpec { columns }
    }

    pub fn primary_key(&self) -> Option<&ColumnDef> {
        self.columns.iter().find(|column| column.primary_key)
    }
}

impl core::fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        for (index, column) in self.columns.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }

            write!(f, "{} {}", column.name, column.code.as_str())?;

            if let Some(size) = column.size {
                write!(f, "({size})")?;
            }

            if column.primary_key {
                f.write_str(" KEY")?;
            }
        }
        Ok(())
    }
}
