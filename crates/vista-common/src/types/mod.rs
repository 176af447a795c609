mod angle;
mod orientation;
mod reference;

pub use angle::*;
pub use orientation::*;
pub use reference::*;
