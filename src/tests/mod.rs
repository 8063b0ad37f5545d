#[cfg(unix)]
mod support;

#[cfg(unix)]
mod api_tests;
