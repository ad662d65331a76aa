//! Internal test modules - whitebox tests with crate access
//!
//! These drive a `TuiApp<TestBackend>` through the test harness with
//! fixture views, so no git repository or real terminal is needed.

mod acceptance_pager;
