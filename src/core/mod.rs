//! Shared text helpers used by the resolver, scanner and link builder.

pub mod text_utils;
