pub mod client;

pub use client::RickAndMortyClient;
