//! Service Kit - Agent Tools
//!
//! Domain tools implementing `agent_core::Tool<ProverbState>`.

mod lat_lng;
mod proverbs;
mod search;
mod weather;

pub use lat_lng::GetLatLngTool;
pub use proverbs::{AddProverbsTool, GetProverbsTool, SetProverbsTool};
pub use search::SearchTool;
pub use weather::GetWeatherTool;
