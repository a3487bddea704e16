pub mod family;
pub mod records;

pub use family::DocumentFamily;
pub use records::*;
