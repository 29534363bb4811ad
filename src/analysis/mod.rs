pub mod token;
pub mod segmenter;
pub mod tokenizer;
