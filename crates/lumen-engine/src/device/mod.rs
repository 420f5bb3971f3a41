//! Device, queue and surface for one window, plus frame acquire/present.

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
