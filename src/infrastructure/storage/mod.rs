mod public_object_fetcher;

pub use public_object_fetcher::PublicObjectFetcher;
