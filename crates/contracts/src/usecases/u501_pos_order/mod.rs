pub mod cart;
pub mod request;
pub mod response;

pub use cart::*;
pub use request::*;
pub use response::*;
