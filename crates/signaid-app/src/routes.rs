pub mod match_signs;
pub mod status;
pub mod vocabulary;
