pub mod dom_views;
pub mod markup;
pub mod pages;
pub mod renderers;
pub mod wasm_api;
