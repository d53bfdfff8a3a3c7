use foundation::math::Vec2;
use scene::{ViewConfig, ViewState};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn svg_element(doc: &Document, tag: &str) -> Result<Element, JsValue> {
    doc.create_element_ns(Some(SVG_NS), tag)
}

pub fn set_attrs(el: &Element, attrs: &[(&str, &str)]) -> Result<(), JsValue> {
    for (name, value) in attrs {
        el.set_attribute(name, value)?;
    }
    Ok(())
}

fn input_by_id(doc: &Document, id: &str) -> Option<HtmlInputElement> {
    doc.get_element_by_id(id)
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
}

/// Attribute values written by Slider Setup.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderSetup {
    pub max: String,
    pub value: &'static str,
    pub label: String,
}

impl SliderSetup {
    pub fn new(config: &ViewConfig, max: f64) -> Self {
        Self {
            max: max.to_string(),
            value: "0",
            label: config.zero_label(),
        }
    }
}

/// Prefix-scoped UI controls of one view. Any of them may be missing.
#[derive(Debug, Clone)]
pub struct Controls {
    pub show_survived: Option<HtmlInputElement>,
    pub show_erased: Option<HtmlInputElement>,
    pub slider: Option<HtmlInputElement>,
    pub slider_label: Option<Element>,
}

impl Controls {
    pub fn resolve(doc: &Document, config: &ViewConfig) -> Self {
        Self {
            show_survived: input_by_id(doc, &config.show_survived_id()),
            show_erased: input_by_id(doc, &config.show_erased_id()),
            slider: input_by_id(doc, &config.slider_id()),
            slider_label: doc.get_element_by_id(&config.slider_label_id()),
        }
    }

    pub fn read_state(&self) -> ViewState {
        let slider_value = self.slider.as_ref().map(|s| s.value());
        ViewState::from_controls(
            self.show_survived.as_ref().map(|c| c.checked()),
            self.show_erased.as_ref().map(|c| c.checked()),
            slider_value.as_deref(),
        )
    }

    /// Slider Setup: bound the slider to `max`, reset it and its label to zero.
    /// Absent controls are skipped.
    pub fn setup_slider(&self, config: &ViewConfig, max: f64) {
        let setup = SliderSetup::new(config, max);
        if let Some(slider) = &self.slider {
            slider.set_max(&setup.max);
            slider.set_value(setup.value);
        }
        if let Some(label) = &self.slider_label {
            label.set_text_content(Some(&setup.label));
        }
    }

    /// Mirrors the slider value into its label.
    pub fn sync_label(&self, config: &ViewConfig) {
        if let (Some(slider), Some(label)) = (&self.slider, &self.slider_label) {
            label.set_text_content(Some(&config.filter.label_text(&slider.value())));
        }
    }
}

/// Shared hover tooltip element.
#[derive(Debug, Clone)]
pub struct Tooltip {
    el: Option<HtmlElement>,
}

impl Tooltip {
    pub fn resolve(doc: &Document, id: &str) -> Self {
        Self {
            el: doc
                .get_element_by_id(id)
                .and_then(|e| e.dyn_into::<HtmlElement>().ok()),
        }
    }

    pub fn show(&self, html: &str, at: Vec2) {
        let Some(el) = &self.el else {
            return;
        };
        el.set_inner_html(html);
        let style = el.style();
        let _ = style.set_property("opacity", "0.9");
        self.place(at);
    }

    pub fn place(&self, at: Vec2) {
        let Some(el) = &self.el else {
            return;
        };
        let style = el.style();
        let _ = style.set_property("left", &format!("{}px", at.x));
        let _ = style.set_property("top", &format!("{}px", at.y));
    }

    pub fn hide(&self) {
        if let Some(el) = &self.el {
            let _ = el.style().set_property("opacity", "0");
        }
    }
}

/// Event listener that unregisters itself when dropped.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// `data-key` of the element an event was dispatched to, if any.
pub fn event_marker_key(event: &Event) -> Option<String> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .get_attribute("data-key")
}

/// Converts a client-space pointer position into surface (viewBox) units for
/// an element rendered at `rect_*` with a `width` × `height` viewBox.
pub fn client_to_surface(
    client: Vec2,
    rect_origin: Vec2,
    rect_size: Vec2,
    width: f64,
    height: f64,
) -> Vec2 {
    let sx = if rect_size.x > 0.0 { width / rect_size.x } else { 1.0 };
    let sy = if rect_size.y > 0.0 { height / rect_size.y } else { 1.0 };
    Vec2::new((client.x - rect_origin.x) * sx, (client.y - rect_origin.y) * sy)
}
