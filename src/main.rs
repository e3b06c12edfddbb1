mod components;
mod config;
mod model;
mod state;
mod util;

use components::App;

fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
