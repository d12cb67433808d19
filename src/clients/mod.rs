pub mod court_client;

pub use court_client::CourtClient;
