/// SQL dialect spoken by a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Postgresql,
    Sqlite,
    Mysql,
}

#[derive(Debug)]
pub struct Capability {
    /// Dialect used to serialize statements for this database.
    pub flavor: Flavor,

    /// When `Some` the database supports varchar types with the specified upper
    /// limit. Otherwise STRING columns are created as unbounded text.
    pub varchar: Option<u32>,

    /// True if the database manages sequences natively. Otherwise the driver
    /// emulates them with a counter table.
    pub native_sequences: bool,
}

impl Capability {
    /// SQLite capabilities.
    pub const SQLITE: Self = Self {
        flavor: Flavor::Sqlite,
        varchar: None,
        native_sequences: false,
    };

    /// PostgreSQL capabilities
    pub const POSTGRESQL: Self = Self {
        flavor: Flavor::Postgresql,
        varchar: Some(10_485_760),
        native_sequences: true,
    };

    /// MySQL capabilities
    pub const MYSQL: Self = Self {
        flavor: Flavor::Mysql,
        varchar: Some(65_535),
        native_sequences: false,
    };
}
