pub mod achievements;
pub mod assets;
pub mod health;

pub use achievements::{achievements_page, render_board, render_frozen};
pub use assets::handle_asset;
pub use health::{AppStartTime, health_check};
