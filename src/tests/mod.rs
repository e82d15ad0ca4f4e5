mod cli_tests;
mod extractor_tests;
mod summary_tests;
mod utils;
