//! WASM browser tests for iframe-block-browser.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

#![cfg(all(target_family = "wasm", target_os = "unknown"))]

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use iframe_block_browser::{
    BlockConfig, BlockData, BlockInit, BrowserIframeBlock, BrowserScheduler,
    BrowserSurfaceFactory, BrowserTextArea, HostServices, InputSurface, Phase, StyleClasses,
    Untranslated, ValidationState, html_from_paste_event,
};

const IFRAME: &str = "<iframe src=\"https://example.com/embed\"></iframe>";

fn make_block(html: &str, read_only: bool) -> BrowserIframeBlock {
    let init = BlockInit {
        data: Some(BlockData::new(html)),
        config: BlockConfig::default(),
        read_only,
    };
    let host = HostServices {
        translator: &Untranslated,
        classes: StyleClasses::with_host("ce-block", "cdx-input"),
    };
    BrowserIframeBlock::new(init, &host, BrowserScheduler)
}

fn fire_input(textarea: &web_sys::HtmlTextAreaElement, value: &str) {
    textarea.set_value(value);
    let event = web_sys::Event::new("input").unwrap();
    textarea.dispatch_event(&event).unwrap();
}

// === Rendering ===

#[wasm_bindgen_test]
fn test_render_builds_textarea() {
    let block = make_block(IFRAME, false);
    let surface = block.render(&BrowserSurfaceFactory).unwrap();

    let wrapper = surface.element();
    assert!(wrapper.class_list().contains("ce-block"));
    assert!(wrapper.class_list().contains("cdx-iframe-block"));
    assert_eq!(wrapper.child_element_count(), 1);

    let textarea = surface.textarea();
    assert_eq!(textarea.value(), IFRAME);
    assert!(textarea.class_list().contains("cdx-iframe-block__textarea"));
    assert!(!textarea.disabled());
    assert_eq!(block.phase(), Phase::Mounted);
}

#[wasm_bindgen_test]
fn test_read_only_textarea_is_disabled() {
    let block = make_block(IFRAME, true);
    let surface = block.render(&BrowserSurfaceFactory).unwrap();

    assert!(surface.textarea().disabled());
    fire_input(surface.textarea(), "<div></div>");
    assert_eq!(block.last_validation(), None);
}

// === Input handling ===

#[wasm_bindgen_test]
fn test_input_event_sets_custom_validity() {
    let block = make_block("", false);
    let surface = block.render(&BrowserSurfaceFactory).unwrap();

    fire_input(surface.textarea(), "<div>hi</div>");
    assert_eq!(block.last_validation(), Some(ValidationState::Invalid));
    assert!(!surface.textarea().check_validity());

    fire_input(surface.textarea(), IFRAME);
    assert_eq!(block.last_validation(), Some(ValidationState::Valid));
    assert!(surface.textarea().check_validity());

    assert_eq!(block.save().html, IFRAME);
}

#[wasm_bindgen_test]
fn test_save_reads_live_value() {
    let block = make_block("", false);
    let surface = block.render(&BrowserSurfaceFactory).unwrap();
    surface.set_value(&format!("  {IFRAME}\n"));
    assert_eq!(block.save().html, IFRAME);
}

// === Timers ===

/// Render into the live document so the textarea has a real scroll height.
fn mount(block: &BrowserIframeBlock) -> Rc<BrowserTextArea> {
    let surface = block.render(&BrowserSurfaceFactory).unwrap();
    gloo_utils::body().append_child(surface.element()).unwrap();
    surface
}

fn height(surface: &BrowserTextArea) -> String {
    surface
        .textarea()
        .style()
        .get_property_value("height")
        .unwrap()
}

#[wasm_bindgen_test]
async fn test_mount_resize_runs_after_delay() {
    let block = make_block(IFRAME, true);
    let surface = mount(&block);
    assert_eq!(height(&surface), "");

    TimeoutFuture::new(150).await;
    let px = height(&surface);
    assert!(px.ends_with("px") && px != "0px", "height was {px:?}");

    surface.element().remove();
}

#[wasm_bindgen_test]
async fn test_input_resize_is_debounced() {
    let block = make_block("", false);
    let surface = mount(&block);
    TimeoutFuture::new(150).await;

    // Marks the height until the next resize overwrites it.
    let sentinel = "1px";
    surface.textarea().style().set_property("height", sentinel).unwrap();

    fire_input(surface.textarea(), "<iframe>");
    TimeoutFuture::new(150).await;
    assert_eq!(height(&surface), sentinel);

    // Restarts the window; the first timeout must not fire at 200 ms.
    fire_input(surface.textarea(), "<iframe>\n\n\n</iframe>");
    TimeoutFuture::new(150).await;
    assert_eq!(height(&surface), sentinel);

    TimeoutFuture::new(150).await;
    assert_ne!(height(&surface), sentinel);
    assert!(height(&surface).ends_with("px"));

    surface.element().remove();
}

#[wasm_bindgen_test]
async fn test_rerender_cancels_pending_resize() {
    let block = make_block(IFRAME, false);
    let first = mount(&block);
    let second = mount(&block);

    TimeoutFuture::new(150).await;
    assert_eq!(height(&first), "");
    assert!(height(&second).ends_with("px"));

    first.element().remove();
    second.element().remove();
}

// === Paste ===

#[wasm_bindgen_test]
fn test_paste_event_yields_outer_html() {
    let document = gloo_utils::document();
    let iframe = document.create_element("iframe").unwrap();
    iframe.set_attribute("src", "https://example.com/embed").unwrap();

    let detail = js_sys::Object::new();
    js_sys::Reflect::set(&detail, &"data".into(), &iframe).unwrap();
    let init = web_sys::CustomEventInit::new();
    init.set_detail(&detail);
    let event = web_sys::CustomEvent::new_with_event_init_dict("paste", &init).unwrap();

    let html = html_from_paste_event(event.unchecked_ref()).unwrap();
    assert_eq!(html, IFRAME);

    let block = make_block("", false);
    block.render(&BrowserSurfaceFactory).unwrap();
    assert_eq!(block.paste(&html), Some(ValidationState::Valid));
    assert_eq!(block.save().html, IFRAME);
}

#[wasm_bindgen_test]
fn test_paste_event_without_element() {
    let event = web_sys::CustomEvent::new("paste").unwrap();
    assert_eq!(html_from_paste_event(event.unchecked_ref()), None);
}
