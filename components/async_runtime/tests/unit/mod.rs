//! Unit test harness for async_runtime

mod event_loop_test;
