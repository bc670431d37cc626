pub mod chart;
pub mod export;
pub mod input_panel;
pub mod stats;
pub mod view;

pub use view::Dashboard;
