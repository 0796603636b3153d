pub mod align;
pub mod loader;
pub mod memory;
pub mod window;
pub mod yahoo;

pub use align::align;
pub use loader::fetch_price_table;
pub use memory::InMemorySource;
pub use window::LookbackWindow;
pub use yahoo::YahooClient;
