//! Orrery: animated portfolio. Runs the portfolio_scene app.

use bevy::prelude::*;
use portfolio_scene::prelude::*;

fn main() -> AppExit {
    let _ = dotenvy::dotenv();

    PortfolioBuilder::new()
        .config(portfolio_config())
        .build()
        .run()
}
