mod game;
mod home;
mod records;
mod state;

pub use game::GameView;
pub use home::HomeView;
pub use records::RecordsView;
pub use state::{ViewError, ViewState, view_state_from_resource};
