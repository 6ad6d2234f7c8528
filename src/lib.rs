/*
    Conversion of context-free grammars to Chomsky normal form
*/

pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod normalize;
pub mod parser;
