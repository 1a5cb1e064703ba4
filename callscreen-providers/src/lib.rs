pub mod openai;
pub mod parse;
pub mod request;
pub mod runtime;
