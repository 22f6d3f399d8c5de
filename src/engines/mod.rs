mod bitwise;
mod naive;

pub use bitwise::BitwiseEngine;
pub use naive::NaiveEngine;
