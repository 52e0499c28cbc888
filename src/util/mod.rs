//! Shared utility modules used across Palimpsest components.

pub mod cursor;
