mod cast;
pub use cast::Cast;

mod column_spec;
pub use column_spec::{ColumnDef, ColumnSpec, TypeCode};

mod field;
pub use field::{Field, FieldBuilder};

mod key;
pub use key::{Key, KeyRole, KeyTarget};

mod model;
pub use model::{Model, ModelBuilder, ModelKind};

mod registry;
pub use registry::{Registry, RegistryBuilder};
