pub mod catch_panic;

pub use catch_panic::CatchPanic;
