pub mod extract;
pub mod resolve;
pub mod router;

pub use extract::extract_value;
pub use resolve::resolve_destination;
pub use router::{route, DestinationMap};
