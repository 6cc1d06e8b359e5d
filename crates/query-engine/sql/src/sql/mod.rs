pub mod statements;
pub mod string;
