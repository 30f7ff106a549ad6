//! Song recommendation service infrastructure

mod http_recommender;

pub use http_recommender::HttpRecommender;
