#[macro_use]
mod penpal_err;
mod consts;

pub use consts::*;
pub use penpal_err::*;
