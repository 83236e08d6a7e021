pub mod operators;
pub mod values;
pub mod path;
pub mod conditions;

pub use self::operators::Operator;
pub use self::values::{ComparisonValue, Value};
pub use self::path::{AttributePath, PathFragment, PathSegment};
pub use self::conditions::{JsonCondition, NestedCondition};
