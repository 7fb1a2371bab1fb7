mod document;
mod result;

pub use document::*;
pub use result::*;
