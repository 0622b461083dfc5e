mod store;

pub use store::{JsonStore, GATE_DIR};
pub(crate) use store::read_json;
