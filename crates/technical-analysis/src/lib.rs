pub mod analyzer;
pub mod indicators;
pub mod recommendation;
pub mod signals;


pub use analyzer::*;
pub use indicators::*;
pub use recommendation::*;
pub use signals::*;
