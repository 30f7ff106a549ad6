//! Configuration storage infrastructure

mod xdg;

pub use xdg::XdgConfigStore;
