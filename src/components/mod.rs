pub mod app;
pub mod board_view;
pub mod cell_view;
pub mod controls_panel;
pub mod glide_ghost;
pub mod token;

pub use app::App;
