// Process-level I/O: signals and single-instance locking.
pub mod lock;
pub mod signals;
