//! Integration tests driving the compiled binary

mod cli_tests;
