mod link_state;

pub use link_state::LinkState;
