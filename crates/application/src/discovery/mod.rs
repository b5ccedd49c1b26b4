mod announcer;

pub use announcer::DiscoveryAnnouncer;
