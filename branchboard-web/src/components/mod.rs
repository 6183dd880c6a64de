pub mod char_card;
pub mod task_panel;
pub mod toolbar;
pub mod world_bar;

pub use char_card::CharCard;
pub use task_panel::TaskPanel;
pub use toolbar::Toolbar;
pub use world_bar::WorldBar;
