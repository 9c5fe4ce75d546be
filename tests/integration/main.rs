//! Integration tests driving the HTTP router in-process

mod api_tests;
