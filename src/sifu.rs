//! Main module for sifu library functionality

pub mod ast;
pub mod config;
pub mod formats;
pub mod lexer;
pub mod parser;
pub mod processor;
pub mod testing;
