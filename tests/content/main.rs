mod common;

mod blogs_scenario;
mod query_semantics;
mod versioning;
