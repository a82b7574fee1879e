//! Song pool assembly.
//!
//! - `filter` - one qualifying chart per song for a rating window
//! - `plando` - include, exclude, start inventory and goal lists
//! - `assemble` - the relaxation loop and the final partition

mod assemble;
mod filter;
mod plando;

pub use assemble::*;
pub use filter::*;
pub use plando::*;
