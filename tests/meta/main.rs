//! Checks that the test tree mirrors the source tree
