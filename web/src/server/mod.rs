//! Server-only code (compiled with the `ssr` feature).

pub mod db;
