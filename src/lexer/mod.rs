pub mod comments;
pub mod cursor;
pub mod errors;
pub mod scanner;
pub mod tokens;

pub use comments::*;
pub use cursor::*;
pub use errors::*;
pub use scanner::*;
pub use tokens::*;
