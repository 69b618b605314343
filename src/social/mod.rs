// Timeline API client — user lookup and post fetching.
//
// The concrete client is a thin reqwest wrapper; the SocialApi trait lets
// the ingestion pipeline run against a scripted mock in tests.

pub mod client;
pub mod traits;
