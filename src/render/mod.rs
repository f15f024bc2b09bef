//! Terminal presentation: a [`Canvas`] the engine draws into and a ratatui [`Renderer`].

pub mod canvas;
pub mod renderer;

pub use canvas::Canvas;
pub use renderer::Renderer;
