mod criteria;
pub use criteria::{Criterion, Example, Operator};

mod record;
pub use record::Record;

mod row;
pub use row::Row;

mod value;
pub use value::Value;
