pub mod api;
pub mod driver;
pub mod machine;

mod error;

pub use api::ApiClient;
pub use driver::DirectoryClient;
pub use error::{Error, Result};
pub use machine::{
	DEFAULT_DEBOUNCE, DirectoryMachine, Effect, Event, PAGE_SIZE, PageControls, PageMove, Phase,
	RequestId, Snapshot,
};
