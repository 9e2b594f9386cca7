pub mod annotation;
pub mod document;
pub mod record;
pub mod segment;

pub use annotation::*;
pub use document::*;
pub use record::*;
pub use segment::*;
