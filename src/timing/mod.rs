//! The timing engine proper: the forward and backward passes, plus the
//! shared atomic-float primitive both rely on for their CAS reductions.

pub mod atomic_float;
pub mod backward;
pub mod forward;

pub use backward::{run_backward_pass, BackwardResult};
pub use forward::{run_forward_pass, ForwardResult};
