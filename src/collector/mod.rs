pub mod circuit_protected;
pub mod modem;

pub use circuit_protected::CircuitProtectedCollector;
pub use modem::ModemMetricCollector;
