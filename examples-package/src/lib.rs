//! Runnable demos for relcache. See the `examples/` directory.
