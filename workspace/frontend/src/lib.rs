use wasm_bindgen::prelude::*;
use yew::prelude::*;

mod components;
pub mod api_client;
pub mod settings;
pub mod widgets;

use components::dashboard::Dashboard;
use widgets::toast::ToastProvider;

#[function_component(App)]
fn app() -> Html {
    html! {
        <ToastProvider>
            <Dashboard />
        </ToastProvider>
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    settings::init_settings();
    let app_settings = settings::get_settings();

    wasm_logger::init(wasm_logger::Config::new(app_settings.log_level));

    log::info!("Starting Solar AI Forecast dashboard");
    log::info!(
        "Environment: {}, prediction endpoint: {}",
        app_settings.environment.name(),
        app_settings.predict_url()
    );
    log::debug!("Request timeout: {} ms", app_settings.request_timeout_ms);

    yew::Renderer::<App>::new().render();
}
