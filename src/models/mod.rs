pub mod counts;
pub mod source;
pub mod vocab;
pub mod weights;

pub use counts::*;
pub use source::*;
pub use vocab::*;
pub use weights::*;
