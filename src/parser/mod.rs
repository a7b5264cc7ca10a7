pub mod ast;
pub mod declarations;
pub mod errors;
pub mod expressions;
pub mod statements;

pub use ast::*;
pub use declarations::parse_tokens;
pub use errors::*;
pub use expressions::Parser;
