pub mod nba;
pub mod provider;
pub mod stats;

pub use nba::ApiNba;
pub use provider::StatsClient;
