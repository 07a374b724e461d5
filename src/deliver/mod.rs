pub mod batch;
pub mod channel;
pub mod dispatch;
pub mod http;

pub use batch::{build_batches, Batch, MAX_RECORDS_PER_BATCH};
pub use channel::{ChannelError, DeliveryChannel, PutBatchOutput, RecordResult};
pub use dispatch::{DispatchError, Dispatcher, MAX_RETRY, RETRY_INTERVAL};
pub use http::HttpChannel;
