//! Property-based tests for the codecs and the rule language.
