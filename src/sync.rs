//! Synchronization primitives used by the facility.
//!
//! Locks come from `parking_lot` and never poison. `OnceCell` is
//! `std::sync::OnceLock`.
//!
//! ```
//! use parking_facility::sync::{const_mutex, Mutex, OnceCell};
//!
//! static GUARD: Mutex<()> = const_mutex(());
//! static VALUE: OnceCell<u32> = OnceCell::new();
//!
//! let _held = GUARD.lock();
//! assert_eq!(*VALUE.get_or_init(|| 42), 42);
//! ```

pub use parking_lot::{const_mutex, Mutex, MutexGuard};
pub use std::sync::OnceLock as OnceCell;
