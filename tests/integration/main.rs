//! Integration tests for pdf-harvest
//!
//! Each module drives one public entry point end-to-end: the crawler
//! against wiremock servers, and the two folder utilities against
//! temporary directories.

mod crawl_tests;
mod dedupe_tests;
mod extract_tests;
