pub mod pair_feed_client;

pub use pair_feed_client::PairFeedClient;
