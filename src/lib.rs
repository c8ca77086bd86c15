pub mod body;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod env_state;
pub mod ephemeris;
pub mod kepler;
pub mod orbital_elements;
pub mod pipeline;
pub mod selector;
pub mod slf_errors;
pub mod slf_writer;
pub mod state_vector;
pub mod time;
