//! Minimal prelude for SDK consumers.

pub use crate::config::{portfolio_config, PortfolioConfig};
pub use crate::render::{EntityRenderer, SphereRenderer};
pub use crate::scene::ScenePreset;
pub use crate::sdk::PortfolioBuilder;
pub use crate::ui::{ActiveSection, NavigateTo};
