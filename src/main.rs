// src/main.rs — AI Art & Video Generator (Rust + Yew + WASM)
mod api;
mod app;
mod config;
mod error;
mod media;
mod state;

fn main() {
    gloo::console::log!("ai_art_generator starting");
    yew::Renderer::<app::App>::new().render();
}
