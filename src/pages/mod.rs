//! Page sessions. Each owns its state and timers; dropping a session tears
//! both down.

pub mod junior;
pub mod scenario;
pub mod starter;
pub mod teen;
pub mod trader;

pub use junior::JuniorSession;
pub use scenario::ScenarioSession;
pub use starter::StarterSession;
pub use teen::TeenSession;
pub use trader::TraderSession;
