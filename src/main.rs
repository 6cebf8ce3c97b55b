mod api;
mod app;
mod catalog;
mod cells;
mod config;
mod model;
mod prices;
mod state;

fn main() {
    yew::Renderer::<app::App>::new().render();
}
