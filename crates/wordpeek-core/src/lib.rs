pub mod lookup;
pub mod presenter;
pub mod registry;
pub mod router;
pub mod state;

pub use lookup::LookupService;
pub use presenter::Presenter;
pub use registry::SurfaceRegistry;
pub use router::{EventRouter, Flow, RequestPhase};
pub use state::HotkeyRegistration;

#[cfg(test)]
mod tests;
