mod buffer;
mod class_voq;

pub use buffer::{Admission, VoqBuffer};
pub use class_voq::ClassVoq;
