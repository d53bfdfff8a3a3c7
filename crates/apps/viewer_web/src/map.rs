use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use foundation::math::Vec2;
use layers::SurfaceLayer;
use layers::symbology::{LayerStyle, paint_css};
use layers::vector::fmt_px;
use scene::{MapView, ViewConfig, ViewData, WheelDeltaMode};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, MouseEvent, WheelEvent};

use crate::dom::{
    Controls, Listener, Tooltip, client_to_surface, event_marker_key, set_attrs, svg_element,
};

pub const SURFACE_CLASS: &str = "crater-map";
const DBLCLICK_ZOOM: f64 = 2.0;

fn style_element(el: &Element, style: &LayerStyle) -> Result<(), JsValue> {
    set_attrs(
        el,
        &[
            ("fill", &paint_css(style.fill)),
            ("stroke", &paint_css(style.stroke)),
            ("stroke-width", &style.stroke_width.to_string()),
        ],
    )
}

/// DOM-side state of one mounted view.
pub struct ViewRuntime {
    view: MapView,
    doc: Document,
    controls: Controls,
    tooltip: Tooltip,
    svg: Element,
    zoom_layers: Vec<Element>,
    marker_group: Element,
    circles: HashMap<String, Element>,
    drag: Option<Vec2>,
}

impl ViewRuntime {
    pub fn view(&self) -> &MapView {
        &self.view
    }

    /// Reads the controls, reruns the update and applies the marker join.
    pub fn redraw(&mut self) -> Result<(), JsValue> {
        let state = self.controls.read_state();
        self.controls.sync_label(self.view.config());
        let join = self.view.update(state);

        for key in &join.exit {
            if let Some(el) = self.circles.remove(key.as_str()) {
                el.remove();
            }
        }
        for key in &join.enter {
            let el = svg_element(&self.doc, "circle")?;
            el.set_attribute("data-key", key.as_str())?;
            self.marker_group.append_child(&el)?;
            self.circles.insert(key.to_string(), el);
        }

        let style = self.view.context().style;
        for marker in self.view.markers() {
            let Some(el) = self.circles.get(marker.key.as_str()) else {
                continue;
            };
            set_attrs(
                el,
                &[
                    ("cx", &fmt_px(marker.center.x)),
                    ("cy", &fmt_px(marker.center.y)),
                    ("r", &fmt_px(marker.radius)),
                    ("class", marker.class_name()),
                ],
            )?;
            style_element(el, style.category(marker.record.category))?;
        }
        Ok(())
    }

    pub fn apply_zoom(&self) -> Result<(), JsValue> {
        let transform = self.view.zoom().to_svg();
        for el in &self.zoom_layers {
            el.set_attribute("transform", &transform)?;
        }
        Ok(())
    }

    fn pointer_on_surface(&self, event: &MouseEvent) -> Vec2 {
        let rect = self.svg.get_bounding_client_rect();
        let surface = self.view.surface();
        client_to_surface(
            Vec2::new(event.client_x() as f64, event.client_y() as f64),
            Vec2::new(rect.left(), rect.top()),
            Vec2::new(rect.width(), rect.height()),
            surface.width,
            surface.height,
        )
    }

    fn on_wheel(&mut self, event: &WheelEvent) -> Result<(), JsValue> {
        event.prevent_default();
        let anchor = self.pointer_on_surface(event);
        let mode = WheelDeltaMode::from_dom(event.delta_mode());
        self.view.zoom_mut().zoom_at(anchor, event.delta_y(), mode);
        self.apply_zoom()
    }

    pub fn reset_zoom(&mut self) -> Result<(), JsValue> {
        self.view.zoom_mut().reset();
        self.apply_zoom()
    }

    fn on_dblclick(&mut self, event: &MouseEvent) -> Result<(), JsValue> {
        let anchor = self.pointer_on_surface(event);
        let k = self.view.zoom().k * DBLCLICK_ZOOM;
        self.view.zoom_mut().scale_to(k, anchor);
        self.apply_zoom()
    }

    fn on_drag_move(&mut self, event: &MouseEvent) -> Result<(), JsValue> {
        let Some(last) = self.drag else {
            return Ok(());
        };
        let now = self.pointer_on_surface(event);
        let d = now - last;
        self.drag = Some(now);
        self.view.zoom_mut().pan(d.x, d.y);
        self.apply_zoom()
    }

    fn on_hover(&self, event: &Event) {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let Some(html) = event_marker_key(event).and_then(|k| self.view.tooltip_html(&k)) else {
            return;
        };
        let at = self.tooltip_anchor(mouse);
        self.tooltip.show(&html, at);
    }

    fn tooltip_anchor(&self, event: &MouseEvent) -> Vec2 {
        self.view
            .context()
            .tooltip_position(Vec2::new(event.page_x() as f64, event.page_y() as f64))
    }
}

/// A view mounted into the page. Dropping it detaches its listeners and
/// removes its surface.
pub struct MountedView {
    runtime: Rc<RefCell<ViewRuntime>>,
    _listeners: Vec<Listener>,
}

impl MountedView {
    pub fn runtime(&self) -> &Rc<RefCell<ViewRuntime>> {
        &self.runtime
    }
}

impl Drop for MountedView {
    fn drop(&mut self) {
        if let Ok(rt) = self.runtime.try_borrow() {
            rt.tooltip.hide();
            rt.svg.remove();
        }
    }
}

fn report(result: Result<(), JsValue>) {
    if let Err(err) = result {
        web_sys::console::error_1(&err);
    }
}

/// Registers `handler` against the shared runtime. Events that arrive while
/// the runtime is already borrowed are dropped.
fn bind<F>(
    rt: &Rc<RefCell<ViewRuntime>>,
    target: &web_sys::EventTarget,
    event: &'static str,
    mut handler: F,
) -> Result<Listener, JsValue>
where
    F: FnMut(&mut ViewRuntime, Event) -> Result<(), JsValue> + 'static,
{
    let rt = Rc::clone(rt);
    Listener::new(target, event, move |e| {
        if let Ok(mut rt) = rt.try_borrow_mut() {
            report(handler(&mut rt, e));
        }
    })
}

/// Builds the map surface for `config` inside `#{prefix}-map`, wires the
/// controls and pointer events and draws the initial markers.
pub fn build_map(doc: &Document, config: ViewConfig, data: ViewData) -> Result<MountedView, JsValue> {
    let container_id = config.container_id();
    let container = doc
        .get_element_by_id(&container_id)
        .ok_or_else(|| JsValue::from_str(&format!("missing container #{container_id}")))?;
    if let Some(stale) = container.query_selector(&format!("svg.{SURFACE_CLASS}"))? {
        stale.remove();
    }

    let controls = Controls::resolve(doc, &config);
    let tooltip = Tooltip::resolve(doc, &config.tooltip_id);
    let view = MapView::with_default_context(config, data);
    let surface = view.surface();
    let style = view.context().style;
    let (w, h) = (fmt_px(surface.width), fmt_px(surface.height));

    let svg = svg_element(doc, "svg")?;
    set_attrs(
        &svg,
        &[
            ("class", SURFACE_CLASS),
            ("viewBox", &format!("0 0 {w} {h}")),
            ("width", &w),
            ("height", &h),
        ],
    )?;

    let mut zoom_layers = Vec::new();
    let mut marker_group = None;
    for layer in surface.layers() {
        let el = match layer {
            SurfaceLayer::BaseImage => {
                let Some(img) = &surface.base_image else {
                    continue;
                };
                let el = svg_element(doc, "image")?;
                set_attrs(
                    &el,
                    &[
                        ("href", &img.href),
                        ("x", "0"),
                        ("y", "0"),
                        ("width", &fmt_px(img.width)),
                        ("height", &fmt_px(img.height)),
                        ("preserveAspectRatio", "none"),
                    ],
                )?;
                el
            }
            SurfaceLayer::Sphere => {
                let el = svg_element(doc, "path")?;
                el.set_attribute("d", &surface.sphere_path)?;
                style_element(&el, &style.sphere)?;
                el
            }
            SurfaceLayer::Outline => {
                let Some(d) = &surface.outline_path else {
                    continue;
                };
                let el = svg_element(doc, "path")?;
                el.set_attribute("d", d)?;
                style_element(&el, &style.outline)?;
                el
            }
            SurfaceLayer::Graticule => {
                let el = svg_element(doc, "path")?;
                el.set_attribute("d", &surface.graticule_path)?;
                style_element(&el, &style.graticule)?;
                el
            }
            SurfaceLayer::Markers => {
                let el = svg_element(doc, "g")?;
                marker_group = Some(el.clone());
                el
            }
        };
        el.set_attribute("class", layer.class_name())?;
        if layer.follows_zoom() {
            zoom_layers.push(el.clone());
        }
        svg.append_child(&el)?;
    }
    let marker_group =
        marker_group.ok_or_else(|| JsValue::from_str("surface has no marker layer"))?;
    container.append_child(&svg)?;

    controls.setup_slider(view.config(), view.slider_max());

    let rt = Rc::new(RefCell::new(ViewRuntime {
        view,
        doc: doc.clone(),
        controls: controls.clone(),
        tooltip,
        svg: svg.clone(),
        zoom_layers,
        marker_group: marker_group.clone(),
        circles: HashMap::new(),
        drag: None,
    }));

    let mut listeners = Vec::new();
    for checkbox in [&controls.show_survived, &controls.show_erased]
        .into_iter()
        .flatten()
    {
        listeners.push(bind(&rt, checkbox, "change", |rt, _| rt.redraw())?);
    }
    if let Some(slider) = &controls.slider {
        listeners.push(bind(&rt, slider, "input", |rt, _| rt.redraw())?);
    }

    listeners.push(bind(&rt, &marker_group, "mouseover", |rt, e| {
        rt.on_hover(&e);
        Ok(())
    })?);
    listeners.push(bind(&rt, &marker_group, "mousemove", |rt, e| {
        if let Some(mouse) = e.dyn_ref::<MouseEvent>() {
            rt.tooltip.place(rt.tooltip_anchor(mouse));
        }
        Ok(())
    })?);
    listeners.push(bind(&rt, &marker_group, "mouseout", |rt, _| {
        rt.tooltip.hide();
        Ok(())
    })?);

    listeners.push(bind(&rt, &svg, "wheel", |rt, e| match e.dyn_ref::<WheelEvent>() {
        Some(wheel) => rt.on_wheel(wheel),
        None => Ok(()),
    })?);
    listeners.push(bind(&rt, &svg, "dblclick", |rt, e| {
        match e.dyn_ref::<MouseEvent>() {
            Some(mouse) => {
                mouse.prevent_default();
                rt.on_dblclick(mouse)
            }
            None => Ok(()),
        }
    })?);
    listeners.push(bind(&rt, &svg, "mousedown", |rt, e| {
        if let Some(mouse) = e.dyn_ref::<MouseEvent>() {
            rt.drag = Some(rt.pointer_on_surface(mouse));
        }
        Ok(())
    })?);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    listeners.push(bind(&rt, &window, "mousemove", |rt, e| {
        match e.dyn_ref::<MouseEvent>() {
            Some(mouse) => rt.on_drag_move(mouse),
            None => Ok(()),
        }
    })?);
    listeners.push(bind(&rt, &window, "mouseup", |rt, _| {
        rt.drag = None;
        Ok(())
    })?);

    {
        let mut runtime = rt.borrow_mut();
        runtime.redraw()?;
        runtime.apply_zoom()?;
    }

    Ok(MountedView {
        runtime: rt,
        _listeners: listeners,
    })
}
