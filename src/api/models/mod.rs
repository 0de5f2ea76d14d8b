pub mod books;
pub mod common;
pub mod users;

pub use books::*;
pub use common::*;
pub use users::*;
