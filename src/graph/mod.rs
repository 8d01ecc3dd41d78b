pub mod conversion;
pub mod definition;
pub mod traversal;

pub use conversion::*;
pub use definition::*;
pub use traversal::*;
