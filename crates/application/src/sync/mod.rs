mod controller;

pub use controller::SyncController;
