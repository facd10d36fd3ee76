mod source_tests;
mod utils;
