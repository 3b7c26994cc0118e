//! Buy-versus-rent projection: amortizes a mortgage and a parallel
//! rent-and-invest fund year by year, and exposes the result over a CLI and
//! a small HTTP API.

pub mod api;
pub mod core;
