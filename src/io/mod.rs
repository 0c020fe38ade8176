pub mod catalog;
pub mod output;
pub mod precheck;
pub mod vocab;
pub mod weights;

pub use catalog::*;
pub use output::*;
pub use precheck::*;
pub use vocab::*;
pub use weights::*;
