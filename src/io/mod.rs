pub mod fasta;
pub mod matrix;
pub mod sequence;
pub mod words;
