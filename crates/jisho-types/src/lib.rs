mod entry;
mod query;

pub use entry::{Entry, JapaneseForm, Sense};
pub use query::Query;
