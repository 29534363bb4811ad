pub mod ast;
pub mod optimizer;
