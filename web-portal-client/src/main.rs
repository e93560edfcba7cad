use leptos::*;
use web_portal_client::App;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(error) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("Could not initialize logger. {error}").into());
    }
    mount_to_body(|cx| view! { cx, <App/> })
}
