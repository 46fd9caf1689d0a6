//! Tests for the Graph client.
