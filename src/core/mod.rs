pub mod faction;
pub mod io;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod policy;
pub mod provider;
pub mod rarity;
pub mod registry;
pub mod report;
pub mod stats;
