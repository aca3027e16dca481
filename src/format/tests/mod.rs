//! Unit tests for sidecar file persistence.
//!
//! These tests verify line formatting, normalization against the image
//! dimensions, and save/load round-trips for every shape variant.

mod roundtrip_tests;
