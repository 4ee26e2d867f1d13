use std::rc::Rc;

use moodtunes_core::Controller;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

mod camera;
mod fetch;
mod logging;
mod page;
mod view;

pub use crate::camera::{BrowserCamera, BrowserStream};
pub use crate::fetch::FetchClient;
pub use crate::page::{ElementIds, Page, PageConfig};
pub use crate::view::DomView;

pub type PageController = Controller<BrowserCamera, FetchClient, DomView>;

/// Best-effort human readable text for a rejected promise or thrown value.
pub(crate) fn describe_js_error(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Some(exception) = err.dyn_ref::<web_sys::DomException>() {
        return format!("{}: {}", exception.name(), exception.message());
    }
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{err:?}")
}

fn wire_events(
    window: &web_sys::Window,
    page: &Rc<Page>,
    controller: &Rc<PageController>,
) -> Result<(), JsValue> {
    // Capture: snapshot the preview and send it
    let capture_controller = controller.clone();
    let on_capture = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        let controller = capture_controller.clone();
        spawn_local(async move {
            controller.capture_and_detect().await;
        });
    }) as Box<dyn FnMut(web_sys::Event)>);
    page.capture_button
        .add_event_listener_with_callback("click", on_capture.as_ref().unchecked_ref())?;
    on_capture.forget();

    // Analyze: read the text box at click time
    let analyze_controller = controller.clone();
    let analyze_page = page.clone();
    let on_analyze = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        let controller = analyze_controller.clone();
        let text = analyze_page.text_value();
        spawn_local(async move {
            controller.analyze_text(&text).await;
        });
    }) as Box<dyn FnMut(web_sys::Event)>);
    page.analyze_button
        .add_event_listener_with_callback("click", on_analyze.as_ref().unchecked_ref())?;
    on_analyze.forget();

    let input_controller = controller.clone();
    let input_page = page.clone();
    let on_input = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        input_controller.on_text_input(&input_page.text_value());
    }) as Box<dyn FnMut(web_sys::Event)>);
    page.text_input
        .add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
    on_input.forget();

    // Release the camera when the page goes away
    let unload_controller = controller.clone();
    let on_unload = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        unload_controller.teardown();
    }) as Box<dyn FnMut(web_sys::Event)>);
    window.add_event_listener_with_callback("beforeunload", on_unload.as_ref().unchecked_ref())?;
    on_unload.forget();

    Ok(())
}

// WASM entry point
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init();

    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document on window")?;

    let config = PageConfig::load(&document);
    let page = Rc::new(Page::bind(&document, &config.elements)?);

    // Capture stays off until the camera answers
    page.capture_button.set_disabled(true);

    let controller: Rc<PageController> = Rc::new(Controller::new(
        BrowserCamera::new(page.video.clone(), page.canvas.clone()),
        FetchClient::new(config.client.endpoint.clone()),
        DomView::new(page.clone(), config.client.clone()),
        config.client,
    ));
    controller.on_text_input(&page.text_value());
    wire_events(&window, &page, &controller)?;

    spawn_local(async move {
        controller.initialize_camera().await;
    });

    tracing::info!("moodtunes client started");
    Ok(())
}
