pub mod query_normalizer;
