//! Fetch a GitHub repository with its open issues and render them as a page.

pub mod github;
pub mod model;
pub mod render;
mod template;
pub mod view;
