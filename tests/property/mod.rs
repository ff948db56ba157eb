//! Property-based tests for the line patcher and line store

mod line_patching;
