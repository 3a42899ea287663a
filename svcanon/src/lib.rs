#[cfg(feature = "core")]
#[doc(inline)]
pub use svcanon_core as core;

#[cfg(feature = "io")]
#[doc(inline)]
pub use svcanon_io as io;

#[cfg(feature = "engine")]
#[doc(inline)]
pub use svcanon_engine as engine;
