//! Integration test suite for the Reclaim HTTP API.

mod helpers;

mod auth_test;
mod claim_test;
mod notification_test;
